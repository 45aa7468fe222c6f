//! End-to-end designer flows against the in-memory repository.
#![allow(clippy::float_cmp)]

use std::sync::Arc;

use roomdesigner::catalog::Product;
use roomdesigner::persistence::MemoryRepository;
use roomdesigner::project::ProjectInfo;
use roomdesigner::scene::{Axis, RoomPreset};
use roomdesigner::viewport::StaticViewport;
use roomdesigner::{Outcome, RoomDesigner};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn bookcase() -> Product {
    Product {
        id: "bookcase".into(),
        name: "Bookcase".into(),
        model_3d_url: Some("https://cdn.test/bookcase.glb".into()),
        dim_width: Some(2.0),
        dim_height: Some(2.2),
        dim_depth: Some(2.0),
        dim_sku: Some("m".into()),
        variation_texture_urls: vec![],
    }
}

#[tokio::test]
async fn new_project_add_and_clamp_to_corner() {
    init_tracing();
    let repo = Arc::new(MemoryRepository::new());
    let mut designer = RoomDesigner::new(repo);

    designer.create_new_project();
    let room = designer.store().room().clone();
    assert_eq!((room.width, room.length, room.height), (8.0, 8.0, 3.0));
    assert!(designer.store().furniture().is_empty());

    assert_eq!(designer.store_mut().add_furniture(&bookcase()), Outcome::Applied);
    designer.store_mut().update_furniture_position(0, [10.0, 0.0, 10.0]);

    assert_eq!(designer.store().furniture()[0].position, [7.0, 0.0, 7.0]);
}

#[tokio::test]
async fn design_survives_save_and_reload_in_new_session() {
    init_tracing();
    let repo = Arc::new(MemoryRepository::with_products(vec![bookcase()]));

    let mut first = RoomDesigner::new(repo.clone());
    assert!(first.refresh_catalog().await);
    let preset = RoomPreset::find("Living Room").unwrap();
    first.store_mut().apply_room_preset(&preset);
    assert!(first.add_catalog_product("bookcase").is_applied());
    first.store_mut().rotate_furniture(0, Axis::Y, 90.0);
    first.store_mut().adjust_scale(0, 1.5);
    first.store_mut().update_furniture_texture(0, Some("https://cdn.test/oak.jpg".into()));

    let viewport = StaticViewport { position: [9.0, 7.0, 9.0], fov: 45.0, target: Some([2.5, 0.0, 3.0]) };
    let info = ProjectInfo { name: Some("Reading Nook".into()), ..Default::default() };
    assert!(first.save_project(info, Some(&viewport)).await);
    let id = first.current_project().and_then(|p| p.id.clone()).unwrap();

    let mut second = RoomDesigner::new(repo.clone());
    let loaded = second.load_project(&id).await.unwrap();

    assert_eq!(loaded.name, "Reading Nook");
    assert_eq!(loaded.status, "Draft");
    assert_eq!(second.store().snapshot(), first.store().snapshot());
    assert_eq!(second.store().room(), &preset.room);
    assert_eq!(second.store().camera().view_angle, 45.0);

    assert!(second.delete_project(&id).await);
    assert!(second.current_project().is_none());
    assert!(second.load_project(&id).await.is_none());
    assert_eq!(second.store().furniture().len(), 1);
}
