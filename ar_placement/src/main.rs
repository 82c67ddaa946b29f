use ar_placement::{PlacementMode, PlacementSettings};

/// Desktop entry point. Pass `multi` to spawn a new object on every click.
fn main() {
    let mode = match std::env::args().nth(1).as_deref() {
        Some("multi") => PlacementMode::MultiSpawn,
        _ => PlacementMode::Repositioning,
    };

    let mut app = ar_placement::create_app(PlacementSettings::default().with_mode(mode));
    app.run();
}
