use story_tracker::{
    derivation::produce_card_story, Catalog, CardType, Idol, ProduceCard, Rarity, SortKey,
    SortOrder, Story, StoryFilter, StoryRepository, SupportCard,
};

use crate::fixtures::{catalog, harness, harness_for, ids};

fn rarity_of(harness: &crate::fixtures::Harness, story: &Story) -> Rarity {
    harness
        .engine
        .repository()
        .parent_card(story)
        .map(|card| card.rarity())
        .unwrap()
}

#[test]
fn produce_only_filter() {
    let mut h = harness();
    h.engine.set_filter(StoryFilter::new().card_type(CardType::Produce));

    let stories = h.engine.filtered_stories();
    assert_eq!(stories.len(), 6);
    assert!(stories.iter().all(|s| s.as_produce().is_some()));
}

#[test]
fn one_ssr_produce_and_one_sr_support_card() {
    let mut h = harness_for(Catalog::from_parts(
        "1.0.0",
        "2024-01-01T00:00:00.000Z",
        vec![Idol::new("idol-1", "Haruka"), Idol::new("idol-2", "Chihaya")],
        vec![ProduceCard::new("produce-ssr-1", "Haruka SSR", Rarity::SSR, "idol-1")],
        vec![SupportCard::new("support-sr-1", "Chihaya SR", Rarity::SR, "idol-2")],
    ));
    assert_eq!(h.engine.all_stories().len(), 5);

    h.engine.set_filter(StoryFilter::new().card_type(CardType::Produce));
    let stories = h.engine.filtered_stories();

    assert_eq!(stories.len(), 3);
    assert!(stories.iter().all(|s| s.card_id() == "produce-ssr-1"));
}

#[test]
fn unread_stories_of_owned_cards() {
    let mut h = harness();
    h.ownership.set_owned("produce-ssr-1", true).unwrap();
    h.read_status
        .set_read("ProduceCard-produce-ssr-1-story-1", true)
        .unwrap();

    h.engine
        .set_filter(StoryFilter::new().unread_only(true).owned_only(true));

    assert_eq!(
        ids(&h.engine.filtered_stories()),
        vec![
            "ProduceCard-produce-ssr-1-story-2",
            "ProduceCard-produce-ssr-1-story-3",
        ]
    );
}

#[test]
fn owned_filter_follows_ownership_changes() {
    let mut h = harness();
    h.engine.set_filter(StoryFilter::new().owned_only(true));
    assert!(h.engine.filtered_stories().is_empty());

    h.ownership.toggle_owned("support-sr-1").unwrap();
    assert_eq!(h.engine.filtered_stories().len(), 2);

    h.ownership.toggle_owned("support-sr-1").unwrap();
    assert!(h.engine.filtered_stories().is_empty());
}

#[test]
fn idol_filter_includes_appearing_idols() {
    let mut h = harness();
    h.engine.set_filter(StoryFilter::new().idol_ids(["idol-2"]));

    let stories = h.engine.filtered_stories();
    let card_ids: Vec<&str> = stories.iter().map(Story::card_id).collect();

    assert_eq!(stories.len(), 6);
    assert!(card_ids.contains(&"produce-ssr-2"));
    assert!(card_ids.contains(&"support-ssr-1"));
}

#[test]
fn search_by_idol_name() {
    let mut h = harness();
    h.engine.set_filter(StoryFilter::new().search("天海春香"));

    let stories = h.engine.filtered_stories();
    let card_ids: Vec<&str> = stories.iter().map(Story::card_id).collect();

    assert_eq!(stories.len(), 6);
    assert!(card_ids
        .iter()
        .all(|id| *id == "produce-ssr-1" || *id == "support-ssr-1"));
}

#[test]
fn search_by_partial_card_name_ignores_case() {
    let mut h = harness();
    h.engine.set_filter(StoryFilter::new().search("ssr"));

    let stories = h.engine.filtered_stories();
    assert_eq!(stories.len(), 12);
    assert!(stories.iter().all(|s| rarity_of(&h, s) == Rarity::SSR));
}

#[test]
fn whitespace_search_is_no_filter() {
    let mut h = harness();
    h.engine.set_filter(StoryFilter::new().search("   "));
    let with_blank_query = h.engine.filtered_stories();

    h.engine.clear_filter();
    assert_eq!(with_blank_query, h.engine.filtered_stories());
    assert_eq!(with_blank_query.len(), 16);
}

#[test]
fn rarity_and_unread_combined() {
    let mut h = harness();
    h.read_status
        .set_read("SupportCard-support-ssr-2-story-3", true)
        .unwrap();

    h.engine
        .set_filter(StoryFilter::new().rarity(Rarity::SSR).unread_only(true));

    let stories = h.engine.filtered_stories();
    assert_eq!(stories.len(), 11);
    assert!(!ids(&stories).contains(&"SupportCard-support-ssr-2-story-3".to_string()));
}

#[test]
fn overlay_equals_single_combined_filter() {
    let mut stepwise = harness();
    stepwise
        .engine
        .set_filter(StoryFilter::new().card_type(CardType::Support));
    stepwise
        .engine
        .set_filter(StoryFilter::new().rarity(vec![Rarity::SR, Rarity::R]));

    let mut combined = harness();
    combined.engine.set_filter(
        StoryFilter::new()
            .card_type(CardType::Support)
            .rarity(vec![Rarity::SR, Rarity::R]),
    );

    assert_eq!(stepwise.engine.filter(), combined.engine.filter());
    assert_eq!(
        stepwise.engine.filtered_stories(),
        combined.engine.filtered_stories()
    );
    assert_eq!(stepwise.engine.filtered_stories().len(), 4);
}

#[test]
fn clear_filter_restores_all_stories() {
    let mut h = harness();
    h.engine.set_filter(
        StoryFilter::new()
            .card_type(CardType::Produce)
            .sort_by(SortKey::Name)
            .sort_order(SortOrder::Desc),
    );
    assert_ne!(h.engine.filtered_stories(), h.engine.all_stories());

    h.engine.clear_filter();
    assert_eq!(h.engine.filter().sort_by, None);
    assert_eq!(h.engine.filtered_stories(), h.engine.all_stories());
}

#[test]
fn sort_by_rarity_groups_r_then_sr_then_ssr() {
    let mut h = harness();
    h.engine.set_filter(StoryFilter::new().sort_by(SortKey::Rarity));

    let ranks: Vec<u8> = h
        .engine
        .filtered_stories()
        .iter()
        .map(|s| rarity_of(&h, s).rank())
        .collect();
    assert_eq!(ranks.len(), 16);
    assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(ranks[0], 1);

    h.engine
        .set_filter(StoryFilter::new().sort_order(SortOrder::Desc));
    let ranks: Vec<u8> = h
        .engine
        .filtered_stories()
        .iter()
        .map(|s| rarity_of(&h, s).rank())
        .collect();
    assert!(ranks.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(ranks[0], 3);
}

#[test]
fn sort_by_name_uses_japanese_collation() {
    let mut h = harness_for(Catalog::from_parts(
        "1.0.0",
        "2024-01-01T00:00:00.000Z",
        vec![Idol::new("idol-1", "天海春香")],
        vec![],
        vec![
            SupportCard::new("support-ichigo", "いちご", Rarity::R, "idol-1"),
            SupportCard::new("support-idol", "アイドル", Rarity::R, "idol-1"),
            SupportCard::new("support-kaze", "かぜ", Rarity::R, "idol-1"),
        ],
    ));
    h.engine.set_filter(StoryFilter::new().sort_by(SortKey::Name));

    let card_ids: Vec<String> = h
        .engine
        .filtered_stories()
        .iter()
        .map(|s| s.card_id().to_string())
        .collect();
    assert_eq!(
        card_ids,
        vec![
            "support-idol",
            "support-idol",
            "support-ichigo",
            "support-ichigo",
            "support-kaze",
            "support-kaze",
        ]
    );
}

#[test]
fn sort_ties_keep_story_index_order() {
    let mut h = harness();
    h.engine.set_filter(
        StoryFilter::new()
            .card_type(CardType::Support)
            .sort_by(SortKey::CardId)
            .sort_order(SortOrder::Desc),
    );

    assert_eq!(
        ids(&h.engine.filtered_stories()),
        vec![
            "SupportCard-support-ssr-2-story-1",
            "SupportCard-support-ssr-2-story-2",
            "SupportCard-support-ssr-2-story-3",
            "SupportCard-support-ssr-1-story-1",
            "SupportCard-support-ssr-1-story-2",
            "SupportCard-support-ssr-1-story-3",
            "SupportCard-support-sr-1-story-1",
            "SupportCard-support-sr-1-story-2",
            "SupportCard-support-r-1-story-1",
            "SupportCard-support-r-1-story-2",
        ]
    );
}

#[test]
fn dangling_story_only_survives_structural_views() {
    let mut dangling_catalog = catalog();
    dangling_catalog
        .produce_card_stories
        .push(produce_card_story("produce-missing", 1));
    let dangling_id = "ProduceCard-produce-missing-story-1".to_string();

    let mut h = harness_for(dangling_catalog);
    h.ownership.set_owned("produce-missing", true).unwrap();

    assert!(ids(&h.engine.all_stories()).contains(&dangling_id));
    assert!(h.engine.repository().find_by_id(&dangling_id).is_some());

    h.engine
        .set_filter(StoryFilter::new().card_type(CardType::Produce));
    assert!(ids(&h.engine.filtered_stories()).contains(&dangling_id));

    let excluded_by = [
        StoryFilter::new().rarity(vec![Rarity::SSR, Rarity::SR, Rarity::R]),
        StoryFilter::new().owned_only(true),
        StoryFilter::new().idol_ids(["idol-1", "idol-2", "idol-3", "idol-4", "idol-5"]),
        StoryFilter::new().sort_by(SortKey::Name),
        StoryFilter::new().sort_by(SortKey::Rarity),
        StoryFilter::new().sort_by(SortKey::IdolId),
    ];
    for filter in excluded_by {
        h.engine.clear_filter();
        h.engine.set_filter(filter.clone());
        assert!(
            !ids(&h.engine.filtered_stories()).contains(&dangling_id),
            "{:?}",
            filter
        );
    }
}
