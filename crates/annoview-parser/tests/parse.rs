use annoview_core::document::Node;
use annoview_core::view::ViewKind;
use annoview_parser::error::ErrorCode;
use annoview_parser::{ModelSource, evaluate_document, parse_annotation};

const TUBE: &str = r#"
model Tube
  parameter Real length = 10;
  parameter Real diameter = 2;
  Real flow_rate;
  annotation(Icon(graphics = {
    Rectangle(extent = {{-50, -diameter*10}, {50, diameter*10}}, fillColor = {200, 200, 255}),
    Line(points = {{-length, 0}, {length, 0}}, color = {0, 0, 255}),
    Line(points = {{0, -5}, {0, 5}}),
    Line(points = {{1, -5}, {1, 5}}),
    Text(extent = {{-70, 10}, {-30, 30}}, textString = "Inlet", fontSize = 12)
  }));
  annotation(Diagram(graphics = {Line(points = {{0, 0}, {10, 10}})}));
equation
  flow_rate = length * diameter;
end Tube;
"#;

fn view_document(model: &str, view: ViewKind) -> annoview_core::document::Document {
    let source = ModelSource::new(model);
    let parameters = source.parameters();
    let block = source.annotation(view).expect("Annotation block not found");

    let mut document = parse_annotation(&block.substitute(&parameters)).expect("Failed to parse");
    evaluate_document(&mut document, &parameters);
    document
}

#[test]
fn test_expressions_use_parameters() {
    let document = view_document(TUBE, ViewKind::Icon);

    let graphics = document.graphics().unwrap().first().as_mapping().unwrap();
    let rectangle = graphics.get("Rectangle").unwrap().first().as_mapping().unwrap();
    let extent = rectangle.get("extent").unwrap().first().as_extent().unwrap();

    assert_eq!(extent.first(), (-50.0, -20.0).into());
    assert_eq!(extent.second(), (50.0, 20.0).into());
}

#[test]
fn test_repeated_lines_keep_source_order() {
    let document = view_document(TUBE, ViewKind::Icon);

    let graphics = document.graphics().unwrap().first().as_mapping().unwrap();
    let keyed: Vec<(String, f64)> = graphics
        .keyed_entries()
        .filter(|(key, _)| key.starts_with("Line"))
        .map(|(key, node)| {
            let points = node.as_mapping().unwrap().get("points").unwrap().first();
            (key, points.as_points().unwrap()[0].x())
        })
        .collect();

    assert_eq!(
        keyed,
        [
            ("Line_0".to_string(), -10.0),
            ("Line_1".to_string(), 0.0),
            ("Line_2".to_string(), 1.0),
        ]
    );
}

#[test]
fn test_single_line_keeps_bare_key() {
    let document = view_document(TUBE, ViewKind::Diagram);

    let graphics = document.graphics().unwrap().first().as_mapping().unwrap();
    let keys: Vec<String> = graphics.keyed_entries().map(|(key, _)| key).collect();
    assert_eq!(keys, ["Line"]);
}

#[test]
fn test_pipeline_is_idempotent() {
    let first = view_document(TUBE, ViewKind::Icon);
    let second = view_document(TUBE, ViewKind::Icon);
    assert_eq!(first, second);
}

#[test]
fn test_string_with_parenthesis() {
    let model = "annotation(Icon(graphics = {Text(extent = {{0, 0}, {1, 1}}, textString = \"f(x) ) ;\")}));";
    let document = view_document(model, ViewKind::Icon);

    let graphics = document.graphics().unwrap().first().as_mapping().unwrap();
    let text = graphics.get("Text").unwrap().first().as_mapping().unwrap();
    assert_eq!(
        text.get("textString").unwrap().first(),
        &Node::string("f(x) ) ;")
    );
}

#[test]
fn test_parse_error_points_into_annotation() {
    let body = "graphics = {Rectangle(extent = {{0, 0}, {1, 1}}, ]}";
    let err = parse_annotation(body).unwrap_err();

    let diagnostic = &err.diagnostics()[0];
    assert_eq!(diagnostic.code(), Some(ErrorCode::E100));
    let span = diagnostic.labels()[0].span();
    assert!(span.end() <= body.len());
}
