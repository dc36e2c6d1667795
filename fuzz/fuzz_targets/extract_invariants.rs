#![no_main]

use layout::{ExtractOptions, Layout, extract_layout};
use libfuzzer_sys::fuzz_target;
use sim_host::{Scene, SimHost};
use tools::whitespace::is_ecma_whitespace;

fn extract(host: &SimHost, options: ExtractOptions) -> Layout {
    let mut diagnostics = Vec::new();
    extract_layout(host, host.container(), options, &mut diagnostics)
}

fuzz_target!(|data: &[u8]| {
    let Some((&width_byte, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    if text.contains(['<', '>', '&']) {
        return;
    }

    // Split into spans on '|', so one input exercises several text nodes.
    let markup: String = text
        .split('|')
        .map(|s| format!("<span data-text>{s}</span>"))
        .collect();
    let mut scene = Scene::new(format!("<div>{markup}</div>"));
    scene.width = 8.0 + f32::from(width_byte);
    let Ok(host) = SimHost::new(&scene) else {
        return;
    };

    for options in [ExtractOptions::character(), ExtractOptions::run()] {
        let layout = extract(&host, options);
        assert_eq!(layout, extract(&host, options));
        for run in layout.lines() {
            assert!(!run.text.is_empty() || options == ExtractOptions::run());
            assert!(run.left <= run.right, "{run:?}");
            assert!(run.left >= 0.0 && run.right <= layout.width() + 0.01, "{run:?}");
            assert!(run.top >= 0.0 && run.bottom <= layout.height() + 0.01, "{run:?}");
        }
    }

    let chars = extract(&host, ExtractOptions::character());
    let joined: String = chars.lines().iter().map(|r| r.text.as_str()).collect();
    let expected: String = text
        .chars()
        .filter(|&c| c != '|' && !is_ecma_whitespace(c))
        .collect();
    assert_eq!(joined, expected);
});

