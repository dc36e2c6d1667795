use layout::{
    CaretSupport, Diagnostic, ExtractOptions, Layout, LayoutHost, compute_layout, extract_layout,
};
use sim_host::{Scene, SimHost};

const PARAGRAPH: &str = "Canvas text cannot reflow, so the browser lays it out and we read the boxes back.";

fn host(spans: &[&str], width: f32) -> SimHost {
    let markup: String = spans
        .iter()
        .map(|s| format!("<span data-text>{s}</span>"))
        .collect();
    let mut scene = Scene::new(format!("<div>{markup}</div>"));
    scene.stylesheet = "div { font: 16px/20px sans-serif }".to_string();
    scene.origin = [30.0, 120.0];
    scene.width = width;
    SimHost::new(&scene).expect("valid scene")
}

fn extract(host: &SimHost, options: ExtractOptions) -> (Layout, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let layout = extract_layout(host, host.container(), options, &mut diagnostics);
    (layout, diagnostics)
}

fn is_js_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

#[test]
fn hi_there_end_to_end() {
    let host = host(&["Hi there"], 300.0);

    let chars = compute_layout(&host, host.container(), true);
    let [hi, there] = chars.lines() else {
        panic!("expected two runs, got {:?}", chars.lines());
    };
    assert_eq!((hi.text.as_str(), there.text.as_str()), ("Hi", "there"));
    assert_eq!((hi.top, hi.bottom), (there.top, there.bottom));
    assert!(hi.right <= there.left);
    assert_eq!(hi.font.as_deref(), Some("16px / 20px sans-serif"));

    let runs = compute_layout(&host, host.container(), false);
    let span = host.text_spans(host.container())[0];
    let origin = host.bounding_client_rect(host.container()).origin();
    let span_rect = host.client_rects(span)[0].relative_to(origin);
    assert_eq!(runs.lines().len(), 1);
    assert_eq!(runs.lines()[0].text, "Hi there");
    assert_eq!(runs.lines()[0].rect(), span_rect);
}

#[test]
fn run_mode_reassembles_a_wrapped_span() {
    for width in [64.0, 120.0, 200.0, 333.0] {
        let host = host(&[PARAGRAPH], width);
        let (layout, diagnostics) = extract(&host, ExtractOptions::run());
        assert!(diagnostics.is_empty(), "width {width}: {diagnostics:?}");
        assert_eq!(
            layout.lines().len(),
            host.client_rects(host.text_spans(host.container())[0]).len()
        );
        let joined: String = layout.lines().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(joined, PARAGRAPH, "width {width}");
    }
}

#[test]
fn character_mode_covers_every_non_space_character() {
    let spans = ["Mixed ", "styles split", " across spans", "with\u{a0}nbsp"];
    for width in [40.0, 96.0, 150.0] {
        let host = host(&spans, width);
        let (layout, diagnostics) = extract(&host, ExtractOptions::character());
        assert!(diagnostics.is_empty());

        let joined: String = layout.lines().iter().map(|r| r.text.as_str()).collect();
        let expected: String = spans.concat().chars().filter(|c| !is_js_space(*c)).collect();
        assert_eq!(joined, expected, "width {width}");
    }
}

#[test]
fn character_mode_rows_are_coalesced() {
    let host = host(&[PARAGRAPH], 150.0);
    let (layout, _) = extract(&host, ExtractOptions::character());
    for pair in layout.lines().windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.top == b.top && a.bottom == b.bottom {
            // Only whitespace may separate two runs of one row.
            assert!(b.left > a.right, "{a:?} then {b:?}");
        }
    }
}

#[test]
fn unsupported_caret_empties_run_mode_only() {
    let mut host = host(&["Hello world"], 300.0);
    host.set_caret_support(CaretSupport::NONE);

    let (runs, diagnostics) = extract(&host, ExtractOptions::run());
    assert!(runs.is_empty());
    assert_eq!(diagnostics[0], Diagnostic::CaretUnsupported);

    let (chars, _) = extract(&host, ExtractOptions::character());
    assert_eq!(chars.lines().len(), 2);
}

#[test]
fn layout_reports_container_offset_size() {
    let host = host(&["abc"], 123.0);
    let layout = compute_layout(&host, host.container(), true);
    assert_eq!(layout.width(), 123.0);
    assert_eq!(layout.height(), 20.0);
}
