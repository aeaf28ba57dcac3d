use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, View};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init | Action::ListFetch => {
            if state.list_loading {
                return DispatchResult::unchanged();
            }
            state.list_loading = true;
            state.list_error = None;
            DispatchResult::changed_with(Effect::LoadList {
                limit: state.list_limit,
                offset: 0,
            })
        }

        Action::ListDidLoad(entries) => {
            state.pager.replace(entries);
            if state.pager.shown() == 0 {
                state.pager.load_more();
            }
            state.list_loading = false;
            state.list_error = None;
            state.clamp_cursor();
            DispatchResult::changed()
        }

        Action::ListDidError(error) => {
            state.list_loading = false;
            state.list_error = Some(error);
            DispatchResult::changed()
        }

        Action::ListLoadMore => {
            if state.is_filtering() || !state.pager.load_more() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::CursorSelect(index) => {
            if state.set_cursor(index) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::CursorMove(delta) => {
            let next = if delta < 0 {
                state.cursor.saturating_sub(delta.unsigned_abs() as usize)
            } else {
                state.cursor.saturating_add(delta as usize)
            };
            if state.set_cursor(next) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::ViewToggle => {
            let view = state.view.toggle();
            set_view(state, view)
        }
        Action::ViewSet(view) => set_view(state, view),

        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.clamp_cursor();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search.active = false;
            state.clamp_cursor();
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            state.cursor = 0;
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.clamp_cursor();
            DispatchResult::changed()
        }

        Action::FavoriteToggle(entity) => {
            let name = entity.name.clone();
            let favorite = state.favorites.toggle(entity);
            tracing::debug!(name, favorite, "favorite toggled");
            state.clamp_cursor();
            match state.breakdown.trigger(&state.favorites) {
                Some(generation) => DispatchResult::changed_with(Effect::ComputeTypeCounts {
                    generation,
                    favorites: state.favorites.entries().to_vec(),
                }),
                None => DispatchResult::changed(),
            }
        }

        Action::TypeCountsDidLoad { generation, counts } => {
            if state.breakdown.publish(generation, counts) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::DetailSelect(name) => {
            let generation = state.selection.select(name.clone());
            DispatchResult::changed_with(Effect::LoadDetail {
                generation,
                name,
                force: false,
            })
        }

        Action::DetailRefresh => {
            let Some(name) = state.selection.name().map(str::to_string) else {
                return DispatchResult::unchanged();
            };
            let generation = state.selection.select(name.clone());
            DispatchResult::changed_with(Effect::LoadDetail {
                generation,
                name,
                force: true,
            })
        }

        Action::DetailDidResolve { generation, detail } => {
            if state.selection.resolve(generation, detail) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::DetailClose => {
            if state.selection.name().is_none() {
                return DispatchResult::unchanged();
            }
            state.selection.clear();
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Tick => {
            if state.is_busy() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn set_view(state: &mut AppState, view: View) -> DispatchResult<Effect> {
    if state.view == view {
        return DispatchResult::unchanged();
    }
    state.view = view;
    state.cursor = 0;
    DispatchResult::changed()
}
