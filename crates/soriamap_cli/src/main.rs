//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `soriamap_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use soriamap_core::{
    AddPoiRequest, Category, MemoryKeyValueStore, MemoryMap, PoiApp,
};

fn main() {
    println!("soriamap_core ping={}", soriamap_core::ping());
    println!("soriamap_core version={}", soriamap_core::core_version());

    let mut app = PoiApp::bootstrap(MemoryKeyValueStore::new(), MemoryMap::new())
        .expect("in-memory bootstrap should succeed");
    app.select_location(41.766, -2.479);
    let poi = app
        .add_poi(AddPoiRequest {
            name: "Probe".to_string(),
            description: String::new(),
            category: Category::Other,
        })
        .expect("probe poi should be accepted");
    println!("soriamap_core probe poi_id={} markers={}", poi.id, app.markers().len());
}
