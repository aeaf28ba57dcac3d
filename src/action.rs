use serde::{Deserialize, Serialize};

use crate::breakdown::TypeCount;
use crate::generation::Generation;
use crate::state::{Detail, Entity, View};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    ListFetch,
    ListDidLoad(Vec<Entity>),
    ListDidError(String),
    ListLoadMore,

    CursorSelect(usize),
    CursorMove(i16),

    ViewToggle,
    ViewSet(View),

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    FavoriteToggle(Entity),
    TypeCountsDidLoad {
        generation: Generation,
        counts: Vec<TypeCount>,
    },

    DetailSelect(String),
    DetailRefresh,
    /// `detail` is `None` when the lookup failed.
    DetailDidResolve {
        generation: Generation,
        detail: Option<Detail>,
    },
    DetailClose,

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
