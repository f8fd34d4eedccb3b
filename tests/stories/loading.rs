use std::collections::HashMap;
use std::fs;

use story_tracker::{
    story_count, validate_catalog, CatalogError, CatalogRepository, DataSourceConfig, DatasetKind,
    IdolCard, ManualDataSource, Rarity, StoryRepository, SupportCard,
};

use crate::fixtures::{
    idols_document, produce_cards_document, support_cards_document, write_dataset, LAST_UPDATED,
    VERSION,
};

fn dummy_source(root: &std::path::Path) -> ManualDataSource {
    write_dataset(
        root,
        DatasetKind::Dummy,
        &idols_document(),
        &produce_cards_document(),
        &support_cards_document(),
    );
    ManualDataSource::new(DataSourceConfig::new(root, DatasetKind::Dummy))
}

#[test]
fn fetch_catalog_derives_stories() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dummy_source(dir.path()).fetch_catalog().unwrap();

    assert_eq!(catalog.version, VERSION);
    assert_eq!(catalog.last_updated, LAST_UPDATED);
    assert_eq!(catalog.idols.len(), 5);
    assert_eq!(catalog.produce_card_stories.len(), 6);
    assert_eq!(catalog.support_card_stories.len(), 10);
    assert_eq!(catalog.story_total(), 16);
    assert_eq!(
        catalog.produce_card_stories[0].id,
        "ProduceCard-produce-ssr-1-story-1"
    );
}

#[test]
fn every_card_gets_contiguous_indices() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dummy_source(dir.path()).fetch_catalog().unwrap();
    let repository = CatalogRepository::new(catalog.clone());

    for card in &catalog.produce_cards {
        let indices: Vec<u32> = repository
            .find_by_produce_card_id(&card.id)
            .iter()
            .map(|story| story.story_index)
            .collect();
        let expected: Vec<u32> = (1..=story_count(card.card_type(), card.rarity)).collect();
        assert_eq!(indices, expected, "{}", card.id);
    }

    for card in &catalog.support_cards {
        let indices: Vec<u32> = repository
            .find_by_support_card_id(&card.id)
            .iter()
            .map(|story| story.story_index)
            .collect();
        let expected: Vec<u32> = (1..=story_count(card.card_type(), card.rarity)).collect();
        assert_eq!(indices, expected, "{}", card.id);
    }
}

#[test]
fn story_ids_are_unique() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dummy_source(dir.path()).fetch_catalog().unwrap();
    let repository = CatalogRepository::new(catalog);

    let mut seen: HashMap<String, usize> = HashMap::new();
    for story in repository.all_stories() {
        *seen.entry(story.id().to_string()).or_default() += 1;
    }
    assert_eq!(seen.len(), 16);
    assert!(seen.values().all(|count| *count == 1));
}

#[test]
fn dataset_kind_selects_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut production_idols = idols_document();
    production_idols.version = "2.0.0".into();
    production_idols.idols.truncate(2);

    write_dataset(
        dir.path(),
        DatasetKind::Dummy,
        &idols_document(),
        &produce_cards_document(),
        &support_cards_document(),
    );
    write_dataset(
        dir.path(),
        DatasetKind::Production,
        &production_idols,
        &produce_cards_document(),
        &support_cards_document(),
    );

    let dummy = ManualDataSource::new(DataSourceConfig::new(dir.path(), DatasetKind::Dummy));
    let production =
        ManualDataSource::new(DataSourceConfig::new(dir.path(), DatasetKind::Production));

    assert_eq!(dummy.fetch_catalog().unwrap().version, VERSION);
    assert_eq!(production.fetch_catalog().unwrap().version, "2.0.0");
    assert_eq!(production.fetch_idols().unwrap().len(), 2);
    assert_eq!(dummy.fetch_idols().unwrap().len(), 5);
}

#[test]
fn missing_document_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    dummy_source(dir.path());
    fs::remove_file(dir.path().join("dummy").join("supportCards.json")).unwrap();

    let source = ManualDataSource::new(DataSourceConfig::new(dir.path(), DatasetKind::Dummy));
    match source.fetch_catalog() {
        Err(CatalogError::Io { path, .. }) => assert!(path.ends_with("supportCards.json")),
        other => panic!("expected io error, got {:?}", other),
    }
    assert!(source.fetch_idols().is_ok());
}

#[test]
fn malformed_document_reports_its_name() {
    let dir = tempfile::tempdir().unwrap();
    let source = dummy_source(dir.path());
    fs::write(
        dir.path().join("dummy").join("produceCards.json"),
        r#"{"version":"1","lastUpdated":"x","produceCards":[{"id":"p"}]}"#,
    )
    .unwrap();

    let err = source.fetch_catalog().unwrap_err();
    assert!(matches!(
        &err,
        CatalogError::Parse { document, .. } if document == "produceCards.json"
    ));
    assert!(err.to_string().contains("produceCards.json"));
}

#[test]
fn config_deserializes_with_defaults() {
    let config: DataSourceConfig = serde_json::from_str(r#"{"dataset":"production"}"#).unwrap();
    assert_eq!(config.dataset, DatasetKind::Production);
    assert_eq!(config.base_dir, DataSourceConfig::default().base_dir);
}

#[test]
fn loaded_catalog_validates() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dummy_source(dir.path()).fetch_catalog().unwrap();
    assert!(validate_catalog(&catalog).is_valid);
}

#[test]
fn dangling_idol_reference_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let mut support_cards = support_cards_document();
    support_cards.support_cards.push(
        SupportCard::new("support-sr-9", "Unknown SR", Rarity::SR, "idol-1")
            .with_appearing(["idol-99"]),
    );
    write_dataset(
        dir.path(),
        DatasetKind::Dummy,
        &idols_document(),
        &produce_cards_document(),
        &support_cards,
    );

    let catalog = ManualDataSource::new(DataSourceConfig::new(dir.path(), DatasetKind::Dummy))
        .fetch_catalog()
        .unwrap();
    let result = validate_catalog(&catalog);

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("idol-99"));
}
