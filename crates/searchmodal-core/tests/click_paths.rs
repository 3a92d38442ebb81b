#![forbid(unsafe_code)]

use pretty_assertions::assert_eq;
use searchmodal_core::{ClickEvent, ClickPath, ClickRegion, Propagation};

#[test]
fn every_origin_has_a_fixed_path() {
    let table: Vec<(ClickRegion, Vec<ClickRegion>)> = ClickRegion::ALL
        .iter()
        .map(|&origin| (origin, ClickPath::from_origin(origin).stages().to_vec()))
        .collect();

    assert_eq!(
        table,
        vec![
            (ClickRegion::Trigger, vec![ClickRegion::Trigger]),
            (
                ClickRegion::Content,
                vec![ClickRegion::Content, ClickRegion::Backdrop]
            ),
            (ClickRegion::Backdrop, vec![ClickRegion::Backdrop]),
            (ClickRegion::Outside, vec![]),
        ]
    );
}

#[test]
fn claiming_handlers_keep_clicks_from_the_window() {
    // Trigger, content and backdrop each stop propagation; outside never does.
    for origin in ClickRegion::ALL {
        let outcome = ClickPath::from_origin(origin)
            .dispatch(&ClickEvent::new(), |_, event| {
                event.stop_propagation();
                Ok::<(), ()>(())
            })
            .unwrap();
        assert_eq!(
            outcome.reaches_window(),
            origin == ClickRegion::Outside,
            "{origin}"
        );
        assert!(outcome.visited.len() <= 1, "{origin}: {:?}", outcome.visited);
    }
}
