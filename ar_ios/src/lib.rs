use ar_placement::PlacementSettings;
use bevy::prelude::bevy_main;

/// iOS app entry point
#[bevy_main]
pub fn main() {
    // Initialize iOS logging using oslog
    if let Err(err) = oslog::OsLogger::new("com.example.ar-placement")
        .level_filter(log::LevelFilter::Debug)
        .init()
    {
        eprintln!("Failed to initialize logger: {err}");
    }

    log::info!("AR Placement iOS App is starting");

    let mut app = ar_placement::create_app(PlacementSettings::default());
    app.run();
}

// Export symbols needed by iOS
#[unsafe(no_mangle)]
pub extern "C" fn start_bevy_app() {
    main();
}
