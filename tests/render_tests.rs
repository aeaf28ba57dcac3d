//! Render checks using RenderHarness on the breakdown panel and the detail
//! overlay.

mod common;

use tui_dispatch::testing::*;

use common::{detail, entity};
use pokefav::breakdown::build_type_counts;
use pokefav::state::{AppState, Detail};
use pokefav::ui::{render_breakdown, render_detail_overlay};

fn pikachu() -> Detail {
    Detail {
        name: "pikachu".into(),
        types: vec!["electric".into()],
        height: 4,
        weight: 60,
        abilities: vec!["static".into(), "lightning-rod".into()],
        held_items: vec!["oran-berry".into(), "light-ball".into()],
        sprite_url: None,
    }
}

fn state_with_counts(types: &[&str]) -> AppState {
    let mut state = AppState::default();
    let mut favorites = state.favorites.clone();
    favorites.toggle(entity("pikachu"));
    let generation = state.breakdown.trigger(&favorites);
    state.favorites = favorites;
    if let Some(generation) = generation {
        state.breakdown.publish(generation, build_type_counts(types.iter().copied()));
    }
    state
}

#[test]
fn overlay_shows_the_detail_fields() {
    let mut render = RenderHarness::new(70, 20);
    let detail = pikachu();

    let output = render.render_to_string_plain(|frame| {
        render_detail_overlay(frame, frame.area(), &detail);
    });

    assert!(output.contains("Pikachu"), "missing name:\n{output}");
    assert!(output.contains("Type: electric"), "missing types:\n{output}");
    assert!(output.contains("Height: 0.4m"), "missing height:\n{output}");
    assert!(output.contains("Weight: 6kg"), "missing weight:\n{output}");
    assert!(
        output.contains("Abilities: static,lightning-rod"),
        "missing abilities:\n{output}"
    );
    assert!(
        output.contains("Held Items: oran-berry,light-ball"),
        "missing held items:\n{output}"
    );
}

#[test]
fn overlay_without_held_items_says_none() {
    let mut render = RenderHarness::new(70, 20);
    let detail = detail("charmander", &["fire"]);

    let output = render.render_to_string_plain(|frame| {
        render_detail_overlay(frame, frame.area(), &detail);
    });

    assert!(output.contains("Charmander"), "missing name:\n{output}");
    assert!(output.contains("Held Items: None"), "missing held items:\n{output}");
}

#[test]
fn breakdown_lists_each_type_with_its_share() {
    let mut render = RenderHarness::new(60, 20);
    let state = state_with_counts(&["grass", "poison", "fire"]);

    let output = render.render_to_string_plain(|frame| {
        render_breakdown(frame, frame.area(), &state);
    });

    assert!(output.contains("fire: 33.33%"), "missing fire:\n{output}");
    assert!(output.contains("grass: 33.33%"), "missing grass:\n{output}");
    assert!(output.contains("poison: 33.33%"), "missing poison:\n{output}");
}

#[test]
fn breakdown_shows_progress_while_counting() {
    let mut render = RenderHarness::new(60, 20);
    let mut state = AppState::default();
    let mut favorites = state.favorites.clone();
    favorites.toggle(entity("pikachu"));
    state.breakdown.trigger(&favorites);
    state.favorites = favorites;

    let output = render.render_to_string_plain(|frame| {
        render_breakdown(frame, frame.area(), &state);
    });

    assert!(output.contains("Counting types"), "missing spinner:\n{output}");
    assert!(!output.contains('%'), "no shares while counting:\n{output}");
}

#[test]
fn empty_breakdown_renders_only_the_frame() {
    let mut render = RenderHarness::new(60, 20);
    let state = AppState::default();

    let output = render.render_to_string_plain(|frame| {
        render_breakdown(frame, frame.area(), &state);
    });

    assert!(output.contains("TYPES"));
    assert!(!output.contains('%'));
}
