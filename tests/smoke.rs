use serde::Serialize;
use xr_panels_layout::{LayoutContainer, LayoutParameters, LayoutVariant, PanelSlot};
use xr_panels_testkit::JsonlSink;
use xr_panels_ui3d::{Panel3D, PanelPresenter, PresentationMode, SolidPanel, Transform3D};

#[derive(Serialize)]
struct PlacedPanel {
    slot: PanelSlot,
    corners: [[f32; 3]; 4],
}

#[test]
fn no_variant_turns_a_panel_away_from_the_viewer() {
    let params = LayoutParameters::default();
    for variant in LayoutVariant::ALL {
        let container = LayoutContainer::with_children(
            variant,
            params,
            (0..3).map(|_| Panel3D::widescreen(params.panel_width as f32)),
        );
        for group in container.groups() {
            let parent = Transform3D::from_placement(&group.placement);
            let normal = group.content.normal(&parent);
            // Panels face back toward the viewer at the origin.
            let to_viewer = -parent.position;
            assert!(
                normal.dot(to_viewer) >= -1e-4,
                "{variant} {:?} faces away",
                group.slot
            );
        }
    }
}

#[test]
fn placed_panels_can_be_logged() {
    let path = std::env::temp_dir().join("xr-panels-smoke.jsonl");
    let mut sink = JsonlSink::create(&path).expect("can create temp log");
    let mut container = LayoutContainer::with_children(
        LayoutVariant::Octagon,
        LayoutParameters::default(),
        [(Panel3D::widescreen(0.8), SolidPanel::new(4, 4, [9, 9, 9, 255]))],
    );
    let mut presenter = PanelPresenter::new(PresentationMode::CompositorLayer);

    container.for_each_mut(|slot, placement, (panel, content)| {
        presenter.present(content);
        let corners = panel
            .world_vertices(&Transform3D::from_placement(&placement))
            .map(|v| v.position);
        sink.write(&PlacedPanel { slot, corners }).expect("can write record");
    });
    sink.flush().expect("flush");

    assert_eq!(sink.records(), 1);
    assert_eq!(presenter.stats().uploads, 1);
}
