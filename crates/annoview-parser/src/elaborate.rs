//! Elaboration of the annotation syntax tree into a [`Document`].
//!
//! Modifiers become mapping entries, brace arrays become sequences and
//! constructor calls become mappings keyed by the constructor name. A brace
//! array whose elements are all constructors (the shape list of `graphics`)
//! becomes a single mapping, so repeated constructors land in one repeated
//! entry. Expressions are copied out of the source text unevaluated.

use log::trace;

use annoview_core::document::{Document, Mapping, Node, Scalar};

use crate::parser_types as types;

pub(crate) struct Builder<'a> {
    source: &'a str,
}

impl<'a> Builder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub fn build(&self, modifiers: Vec<types::Modifier>) -> Document {
        Document::new(self.build_mapping(modifiers))
    }

    fn build_mapping(&self, modifiers: Vec<types::Modifier>) -> Mapping {
        let mut mapping = Mapping::new();
        for modifier in modifiers {
            let name = modifier.name.into_inner();
            let node = match modifier.value {
                types::ModifierValue::Value(value) => self.build_value(value),
                types::ModifierValue::Nested(nested) => Node::Mapping(self.build_mapping(nested)),
            };
            mapping.insert(name, node);
        }
        mapping
    }

    fn build_call(&self, call: types::Call) -> (String, Node) {
        (
            call.name.into_inner(),
            Node::Mapping(self.build_mapping(call.arguments)),
        )
    }

    fn build_value(&self, value: types::Value) -> Node {
        match value {
            types::Value::Array(items) => {
                let items = items.into_inner();
                if !items.is_empty() && items.iter().all(types::Value::is_call) {
                    trace!(count = items.len(); "Collecting constructor list into mapping");
                    let mut mapping = Mapping::new();
                    for item in items {
                        if let types::Value::Call(call) = item {
                            let (name, node) = self.build_call(call);
                            mapping.insert(name, node);
                        }
                    }
                    Node::Mapping(mapping)
                } else {
                    Node::Sequence(items.into_iter().map(|item| self.build_value(item)).collect())
                }
            }
            types::Value::Call(call) => {
                let (name, node) = self.build_call(call);
                let mut mapping = Mapping::new();
                mapping.insert(name, node);
                Node::Mapping(mapping)
            }
            types::Value::Number(number) => Node::number(number.into_inner()),
            types::Value::String(string) => Node::string(string.into_inner()),
            types::Value::Expression(span) => {
                let text = self.source.get(span.range()).unwrap_or_default().trim();
                Node::Scalar(Scalar::Expression(text.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::tokenize, parser::build_annotation};

    fn elaborate(source: &str) -> Document {
        let tokens = tokenize(source).unwrap();
        let modifiers = build_annotation(&tokens).unwrap();
        Builder::new(source).build(modifiers)
    }

    #[test]
    fn test_constructor_list_becomes_mapping() {
        let document = elaborate(
            "graphics = {Line(points = {{0, 0}, {1, 1}}), Text(textString = \"a\"), Line(points = {{1, 1}, {2, 2}})}",
        );

        let graphics = document.graphics().unwrap().first().as_mapping().unwrap();
        let keys: Vec<String> = graphics.keyed_entries().map(|(key, _)| key).collect();
        assert_eq!(keys, ["Line_0", "Line_1", "Text"]);
    }

    #[test]
    fn test_nested_arrays_become_sequences() {
        let document = elaborate("extent = {{-50, -10}, {50, 10}}");

        let extent = document.root().get("extent").unwrap().first();
        assert_eq!(
            extent.as_points().unwrap(),
            [(-50.0, -10.0).into(), (50.0, 10.0).into()]
        );
    }

    #[test]
    fn test_expression_text_is_trimmed_source() {
        let document = elaborate("x = 2 * 3 , y = FillPattern.Solid");

        assert_eq!(
            document.root().get("x").unwrap().first(),
            &Node::expression("2 * 3")
        );
        assert_eq!(
            document.root().get("y").unwrap().first(),
            &Node::expression("FillPattern.Solid")
        );
    }

    #[test]
    fn test_nested_modifier_becomes_mapping() {
        let document = elaborate("coordinateSystem(preserveAspectRatio = true)");

        let system = document.root().get("coordinateSystem").unwrap().first();
        let flag = system.as_mapping().unwrap().get("preserveAspectRatio").unwrap();
        assert_eq!(flag.first(), &Node::expression("true"));
    }

    #[test]
    fn test_single_call_value() {
        let document = elaborate("graphic = Rectangle(extent = {{0, 0}, {1, 1}})");

        let graphic = document.root().get("graphic").unwrap().first().as_mapping().unwrap();
        assert!(graphic.get("Rectangle").is_some());
    }

    #[test]
    fn test_empty_array_is_empty_sequence() {
        let document = elaborate("graphics = {}");
        assert_eq!(document.graphics().unwrap().first(), &Node::Sequence(Vec::new()));
    }
}
