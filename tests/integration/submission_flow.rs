//! Form editing through submission, read back from the document store

use std::sync::Arc;

use firegear_inventory::{
    config::AppConfig,
    form::{FormController, SubmitStatus},
    models::{Category, EquipmentField, IdentityField, LocalFile, MiscField, Slot, StoredSet},
    repository::memory::MemoryDocumentStore,
    services::{object_store::MemoryObjectStore, Services},
    AppError, AppState,
};

const COLLECTION: &str = "equipment-inventories";

struct Harness {
    state: AppState,
    objects: MemoryObjectStore,
    documents: MemoryDocumentStore,
}

fn harness() -> Harness {
    let config = AppConfig::default();
    let objects = MemoryObjectStore::new("https://files.example");
    let documents = MemoryDocumentStore::new();
    let services = Services::new(Arc::new(objects.clone()), Arc::new(documents.clone()), &config);
    Harness {
        state: AppState::new(config, services),
        objects,
        documents,
    }
}

fn identify(form: &FormController) {
    form.edit(|s| {
        s.set_identity(IdentityField::Name, " Jane Doe ");
        s.set_identity(IdentityField::Id, "FD-42");
    });
}

fn jpeg(name: &str) -> LocalFile {
    LocalFile::new(name, "image/jpeg", vec![0xFFu8, 0xD8, 0xFF])
}

#[tokio::test]
async fn test_identity_only_submission_persists_empty_slots() {
    let h = harness();
    let form = h.state.open_form();
    identify(&form);

    let receipt = form.submit().await.expect("submission succeeds");
    receipt.reset.abort();

    let record = h
        .state
        .services
        .inventories
        .get_by_id(&receipt.document_id)
        .await
        .unwrap()
        .expect("document stored");

    assert_eq!(record.id.as_deref(), Some(receipt.document_id.as_str()));
    assert_eq!(record.firefighter_info.firefighter_name, "Jane Doe");
    assert_eq!(record.firefighter_info.firefighter_id, "FD-42");
    assert_eq!(record.firefighter_info.rank, None);
    for category in Category::ALL {
        assert_eq!(record.equipment(category), &StoredSet::default());
    }
    assert!(record.misc_equipment.is_empty());
    assert!(record.submitted_at.is_some());
    assert_eq!(record.submitted_at, record.last_updated);
    assert!(h.objects.keys().await.is_empty());
}

#[tokio::test]
async fn test_photos_land_under_firefighter_folder_and_on_their_items() {
    let h = harness();
    let form = h.state.open_form();
    identify(&form);
    form.edit(|s| {
        s.set_field(Category::Boots, Slot::Secondary, EquipmentField::Serial, "B-2");
        s.select_photo(Category::Boots, Slot::Secondary, Some(jpeg("boot tag.jpg")));
        for kind in ["Radio", "Flashlight", "SCBA mask"] {
            let index = s.add_misc();
            s.set_misc_field(index, MiscField::Type, kind).unwrap();
        }
        s.select_misc_photo(2, Some(jpeg("mask.jpg"))).unwrap();
    });

    let receipt = form.submit().await.unwrap();
    receipt.reset.abort();

    let keys = h.objects.keys().await;
    assert_eq!(keys.len(), 2);
    assert!(keys.iter().all(|k| k.starts_with("equipment-photos/FD-42/")));
    assert!(keys.iter().any(|k| k.ends_with("_boot_tag.jpg")));

    let record = h
        .state
        .services
        .inventories
        .get_by_id(&receipt.document_id)
        .await
        .unwrap()
        .unwrap();
    let boot_url = record.boots.secondary.image_url.as_deref().unwrap();
    assert!(boot_url.starts_with("https://files.example/equipment-photos/FD-42/"));
    assert_eq!(record.boots.secondary.serial.as_deref(), Some("B-2"));
    assert_eq!(record.boots.primary.image_url, None);

    let kinds: Vec<&str> = record.misc_equipment.iter().map(|m| m.kind.as_str()).collect();
    assert_eq!(kinds, ["Radio", "Flashlight", "SCBA mask"]);
    assert!(record.misc_equipment[2].item.image_url.as_deref().unwrap().ends_with("_mask.jpg"));
    assert_eq!(record.misc_equipment[0].item.image_url, None);
}

#[tokio::test]
async fn test_non_image_attachment_stops_before_any_store_call() {
    let h = harness();
    let form = h.state.open_form();
    identify(&form);
    form.edit(|s| {
        s.select_photo(Category::Helmet, Slot::Primary, Some(jpeg("helmet.jpg")));
        s.select_photo(
            Category::Gloves,
            Slot::Primary,
            Some(LocalFile::new("notes.txt", "text/plain", b"hello".to_vec())),
        );
    });

    let err = form.submit().await.unwrap_err();

    assert!(matches!(err, AppError::InvalidType { .. }));
    assert!(err.is_local());
    assert_eq!(
        form.status(),
        SubmitStatus::Error(
            "Failed to upload equipment images: File must be an image: notes.txt (text/plain)".into()
        )
    );
    assert!(h.objects.keys().await.is_empty());
    assert_eq!(h.documents.count(COLLECTION).await, 0);
    // Form is kept for correction
    assert!(form.read(|s| s.view().item(Category::Gloves, Slot::Primary).photo.is_some()));
}

#[tokio::test]
async fn test_removed_misc_item_is_not_persisted() {
    let h = harness();
    let form = h.state.open_form();
    identify(&form);
    form.edit(|s| {
        for kind in ["Radio", "Axe", "Flashlight"] {
            let index = s.add_misc();
            s.set_misc_field(index, MiscField::Type, kind).unwrap();
        }
        s.remove_misc(1).unwrap();
    });

    let receipt = form.submit().await.unwrap();
    receipt.reset.abort();

    let record = h
        .state
        .services
        .inventories
        .get_by_id(&receipt.document_id)
        .await
        .unwrap()
        .unwrap();
    let kinds: Vec<&str> = record.misc_equipment.iter().map(|m| m.kind.as_str()).collect();
    assert_eq!(kinds, ["Radio", "Flashlight"]);
}

#[tokio::test]
async fn test_update_keeps_submission_time() {
    let h = harness();
    let form = h.state.open_form();
    identify(&form);
    let receipt = form.submit().await.unwrap();
    receipt.reset.abort();

    let inventories = &h.state.services.inventories;
    let before = inventories.get_by_id(&receipt.document_id).await.unwrap().unwrap();

    let mut edited = form.read(|s| s.data().clone());
    edited.firefighter_info.rank = Some("Captain".into());
    inventories
        .update(&receipt.document_id, &edited, &Default::default())
        .await
        .unwrap();

    let after = inventories.get_by_id(&receipt.document_id).await.unwrap().unwrap();
    assert_eq!(after.firefighter_info.rank.as_deref(), Some("Captain"));
    assert_eq!(after.submitted_at, before.submitted_at);
    assert!(after.last_updated >= before.last_updated);
    assert_eq!(h.documents.count(COLLECTION).await, 1);
}

#[tokio::test]
async fn test_missing_document_reads_as_none() {
    let h = harness();
    let found = h.state.services.inventories.get_by_id("does-not-exist").await.unwrap();
    assert!(found.is_none());
}
