use layout::Granularity;
use layout_test_support::{
    Fixture, FixtureFilter, diagnostic_lines, diff_lines, layout_json, load_fixtures,
    snapshot_lines,
};
use std::path::Path;

fn fixtures() -> Vec<Fixture> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filter = FixtureFilter::from_env();
    let fixtures: Vec<Fixture> = load_fixtures(&dir)
        .into_iter()
        .filter(|f| filter.matches(&f.name))
        .collect();
    assert!(!fixtures.is_empty(), "no fixtures matched filter");
    fixtures
}

fn check(fixture: &Fixture, granularity: Granularity) {
    let (layout, diagnostics) = fixture.extract(granularity);

    if let Some(expected) = fixture.expect.lines(granularity) {
        let actual = snapshot_lines(&layout);
        if actual != expected {
            panic!(
                "fixture '{}' ({granularity:?}) runs differ\n{}\nlayout:\n{}",
                fixture.name,
                diff_lines(expected, &actual),
                layout_json(&layout)
            );
        }
    }

    if let Some(expected) = fixture.expect.diagnostics(granularity) {
        let actual = diagnostic_lines(&diagnostics);
        if actual != expected {
            panic!(
                "fixture '{}' ({granularity:?}) diagnostics differ\n{}",
                fixture.name,
                diff_lines(expected, &actual)
            );
        }
    }
}

#[test]
fn character_granularity_fixtures() {
    for fixture in fixtures() {
        check(&fixture, Granularity::Character);
    }
}

#[test]
fn run_granularity_fixtures() {
    for fixture in fixtures() {
        check(&fixture, Granularity::Run);
    }
}

#[test]
fn fixture_runs_stay_inside_the_container() {
    for fixture in fixtures() {
        for granularity in [Granularity::Character, Granularity::Run] {
            let (layout, _) = fixture.extract(granularity);
            for run in layout.lines() {
                assert!(
                    run.left >= 0.0
                        && run.top >= 0.0
                        && run.right <= layout.width()
                        && run.bottom <= layout.height(),
                    "fixture '{}' ({granularity:?}): {run:?} outside {}x{}",
                    fixture.name,
                    layout.width(),
                    layout.height()
                );
            }
        }
    }
}

#[test]
fn fixtures_extract_identically_twice() {
    for fixture in fixtures() {
        for granularity in [Granularity::Character, Granularity::Run] {
            let (first, first_diag) = fixture.extract(granularity);
            let (second, second_diag) = fixture.extract(granularity);
            assert_eq!(first, second, "fixture '{}' ({granularity:?})", fixture.name);
            assert_eq!(first_diag, second_diag, "fixture '{}'", fixture.name);
        }
    }
}
