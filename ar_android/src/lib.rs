use ar_placement::PlacementSettings;
use bevy::prelude::bevy_main;

/// Android app entry point
#[bevy_main]
pub fn main() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("ar_placement")
            .with_filter(
                android_logger::FilterBuilder::new()
                    .filter_module("ar_android", log::LevelFilter::Debug)
                    .filter_module("ar_placement", log::LevelFilter::Debug)
                    .filter_level(log::LevelFilter::Info) // Allow info and above from other modules
                    .build(),
            ),
    );

    log::info!("AR Placement Android App is starting");

    let mut app = ar_placement::create_app(PlacementSettings::default());
    app.run();
}
