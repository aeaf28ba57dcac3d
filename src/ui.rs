use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};
use tui_dispatch::{
    Component, EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use crate::action::Action;
use crate::breakdown::type_percent;
use crate::state::{AppState, Detail, View};

const BG_BASE: Color = Color::Rgb(12, 18, 28);
const BG_PANEL: Color = Color::Rgb(20, 32, 46);
const BG_OVERLAY: Color = Color::Rgb(26, 40, 58);
const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
const ACCENT_RED: Color = Color::Rgb(232, 96, 96);

const SLICE_COLORS: [Color; 9] = [
    Color::Rgb(255, 99, 132),
    Color::Rgb(54, 162, 235),
    Color::Rgb(255, 206, 86),
    Color::Rgb(75, 192, 192),
    Color::Rgb(153, 102, 255),
    Color::Rgb(255, 159, 64),
    Color::Rgb(141, 209, 225),
    Color::Rgb(164, 222, 108),
    Color::Rgb(208, 237, 87),
];

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FavComponentId {
    EntryList,
    Detail,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavContext {
    EntryList,
    Detail,
    Search,
}

impl EventRoutingState<FavComponentId, FavContext> for AppState {
    fn focused(&self) -> Option<FavComponentId> {
        self.modal().or(Some(FavComponentId::EntryList))
    }

    fn modal(&self) -> Option<FavComponentId> {
        if self.search.active {
            Some(FavComponentId::Search)
        } else if self.selected_detail().is_some() {
            Some(FavComponentId::Detail)
        } else {
            None
        }
    }

    fn binding_context(&self, id: FavComponentId) -> FavContext {
        match id {
            FavComponentId::EntryList => FavContext::EntryList,
            FavComponentId::Detail => FavContext::Detail,
            FavComponentId::Search => FavContext::Search,
        }
    }

    fn default_context(&self) -> FavContext {
        FavContext::EntryList
    }
}

pub struct FavUi {
    entry_list: SelectList,
    status_bar: StatusBar,
}

impl Default for FavUi {
    fn default() -> Self {
        Self::new()
    }
}

impl FavUi {
    pub fn new() -> Self {
        Self {
            entry_list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<FavComponentId>,
    ) {
        let base = Block::default().style(Style::default().bg(BG_BASE));
        frame.render_widget(base, area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        render_header(frame, layout[0], state, event_ctx);
        match state.view {
            View::All => render_all_view(frame, layout[1], state, event_ctx, &mut self.entry_list),
            View::Favorites => {
                render_favorites_view(frame, layout[1], state, event_ctx, &mut self.entry_list)
            }
        }
        render_footer(frame, layout[2], state, &mut self.status_bar);

        if let Some(detail) = state.selected_detail() {
            let overlay = overlay_rect(area, 56, 12);
            event_ctx.set_component_area(FavComponentId::Detail, overlay);
            render_detail_overlay(frame, area, detail);
        } else {
            event_ctx.component_areas.remove(&FavComponentId::Detail);
        }
    }

    pub fn handle_list_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_list_event(event, state, &mut self.entry_list)
    }

    pub fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_detail_event(event, state)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_search_event(event, state)
    }
}

pub fn handle_list_event(
    event: &EventKind,
    state: &AppState,
    entry_list: &mut SelectList,
) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Enter => state
                .entry_under_cursor()
                .map(|entry| vec![Action::DetailSelect(entry.name.clone())])
                .unwrap_or_default(),
            crossterm::event::KeyCode::Char('f') => state
                .entry_under_cursor()
                .map(|entry| vec![Action::FavoriteToggle(entry.clone())])
                .unwrap_or_default(),
            crossterm::event::KeyCode::Char('m') if state.view == View::All => {
                vec![Action::ListLoadMore]
            }
            crossterm::event::KeyCode::Char('r') => vec![Action::ListFetch],
            _ => {
                let items = entry_items(state);
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.cursor.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: entry_list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::CursorSelect,
                    render_item: &|item| item.clone(),
                };
                let actions: Vec<_> = entry_list.handle_event(event, props).into_iter().collect();
                return handler_response(actions);
            }
        },
        EventKind::Scroll { delta, .. } => vec![Action::CursorMove((*delta * 3) as i16)],
        _ => vec![],
    };
    handler_response(actions)
}

pub fn handle_detail_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Esc
            | crossterm::event::KeyCode::Enter
            | crossterm::event::KeyCode::Backspace => vec![Action::DetailClose],
            crossterm::event::KeyCode::Char('r') => vec![Action::DetailRefresh],
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

pub fn handle_search_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Esc => vec![Action::SearchCancel],
            crossterm::event::KeyCode::Enter => vec![Action::SearchSubmit],
            crossterm::event::KeyCode::Backspace => vec![Action::SearchBackspace],
            crossterm::event::KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<FavComponentId>,
) {
    if state.search.active {
        event_ctx.set_component_area(FavComponentId::Search, area);
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM))
        .title("POKEFAV");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let selected = match state.view {
        View::All => 0,
        View::Favorites => 1,
    };
    let tabs = Tabs::new(vec![
        format!("VIEW ALL ({})", state.pager.total()),
        format!("VIEW FAVORITES ({})", state.favorites.len()),
    ])
    .select(selected)
    .style(Style::default().fg(TEXT_DIM))
    .highlight_style(
        Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(tabs, rows[0]);

    let search = if state.search.active {
        format!("/{}_", state.search.query)
    } else if state.search.query.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", state.search.query)
    };
    let line = Line::from(vec![
        Span::raw("Search: "),
        Span::styled(search, Style::default().fg(ACCENT_TEAL)),
        Span::raw("  |  Shown: "),
        Span::styled(
            format!("{}/{}", state.pager.shown(), state.pager.total()),
            Style::default().fg(ACCENT_GOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), rows[1]);
}

fn render_all_view(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<FavComponentId>,
    entry_list: &mut SelectList,
) {
    let block = panel_block("POKEMON");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.list_loading {
        let text = format!("{} Loading Pokémon…", spinner(state.tick));
        render_notice(frame, inner, text, TEXT_DIM);
        return;
    }
    if let Some(error) = state.list_error.as_deref() {
        render_notice(frame, inner, format!("{error}  (r to retry)"), ACCENT_RED);
        return;
    }
    if state.visible_entries().is_empty() {
        render_notice(frame, inner, "No Pokémon match your search.", TEXT_DIM);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    render_entry_list(frame, layout[0], state, event_ctx, entry_list);

    if !state.is_filtering() {
        let footer = if state.pager.is_exhausted() {
            Span::styled("All Pokémon are shown.", Style::default().fg(TEXT_DIM))
        } else {
            Span::styled("Load more (m)", Style::default().fg(ACCENT_GOLD))
        };
        frame.render_widget(
            Paragraph::new(Line::from(footer)).alignment(Alignment::Center),
            layout[1],
        );
    }
}

fn render_favorites_view(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<FavComponentId>,
    entry_list: &mut SelectList,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let block = panel_block("FAVORITES");
    let inner = block.inner(layout[0]);
    frame.render_widget(block, layout[0]);
    if state.favorites.is_empty() {
        render_notice(frame, inner, "No favorites yet.", TEXT_DIM);
    } else {
        render_entry_list(frame, inner, state, event_ctx, entry_list);
    }

    render_breakdown(frame, layout[1], state);
}

fn render_entry_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<FavComponentId>,
    entry_list: &mut SelectList,
) {
    event_ctx.set_component_area(FavComponentId::EntryList, area);
    let items = entry_items(state);
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.cursor.min(items.len().saturating_sub(1)),
        is_focused: state.selected_detail().is_none() && !state.search.active,
        style: entry_list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        },
        on_select: Action::CursorSelect,
        render_item: &|item| item.clone(),
    };
    entry_list.render(frame, area, props);
}

/// Type breakdown panel: a bar per type and a percentage legend.
pub fn render_breakdown(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = panel_block("TYPES");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.breakdown.is_computing() {
        let text = format!("{} Counting types…", spinner(state.tick));
        render_notice(frame, inner, text, TEXT_DIM);
        return;
    }
    let counts = state.type_counts();
    if counts.is_empty() {
        return;
    }

    let legend_height = (counts.len() as u16).min(inner.height / 2).max(1);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(legend_height)])
        .split(inner);

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(index, count)| {
            Bar::default()
                .value(u64::from(count.value))
                .label(Line::from(count.name.clone()))
                .text_value(count.value.to_string())
                .style(Style::default().fg(SLICE_COLORS[index % SLICE_COLORS.len()]))
        })
        .collect();
    let chart = BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, layout[0]);

    let legend: Vec<Line> = counts
        .iter()
        .enumerate()
        .map(|(index, count)| {
            Line::from(vec![
                Span::styled(
                    "■ ",
                    Style::default().fg(SLICE_COLORS[index % SLICE_COLORS.len()]),
                ),
                Span::raw(format!("{}: {}", count.name, type_percent(&count.name, counts))),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(legend).style(Style::default().fg(TEXT_MAIN)),
        layout[1],
    );
}

pub fn render_detail_overlay(frame: &mut Frame, area: Rect, detail: &Detail) {
    let overlay = overlay_rect(area, 56, 12);
    frame.render_widget(Clear, overlay);
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_OVERLAY).fg(TEXT_MAIN))
        .border_style(Style::default().fg(ACCENT_TEAL))
        .title(format_name(&detail.name));
    let paragraph = Paragraph::new(detail_text(detail))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, overlay);
}

fn detail_text(detail: &Detail) -> Text<'static> {
    let label = Style::default().fg(ACCENT_GOLD);
    let held_items = if detail.held_items.is_empty() {
        "None".to_string()
    } else {
        detail.held_items.join(",")
    };
    let mut lines = vec![
        Line::from(Span::styled(
            format_name(&detail.name),
            Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Type: ", label),
            Span::raw(detail.types.join(",")),
        ]),
        Line::from(vec![
            Span::styled("Height: ", label),
            Span::raw(format!("{}m", tenths(detail.height))),
        ]),
        Line::from(vec![
            Span::styled("Weight: ", label),
            Span::raw(format!("{}kg", tenths(detail.weight))),
        ]),
        Line::from(vec![
            Span::styled("Abilities: ", label),
            Span::raw(detail.abilities.join(",")),
        ]),
        Line::from(vec![Span::styled("Held Items: ", label), Span::raw(held_items)]),
    ];
    if let Some(url) = detail.sprite_url.as_ref() {
        lines.push(Line::from(vec![
            Span::styled("Sprite: ", label),
            Span::raw(url.clone()),
        ]));
    }
    Text::from(lines)
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = if state.list_loading {
        "Loading list...".to_string()
    } else if state.selection.is_loading() {
        format!(
            "Loading {}...",
            state.selection.name().map(format_name).unwrap_or_default()
        )
    } else if state.breakdown.is_computing() {
        "Counting types...".to_string()
    } else {
        "".to_string()
    };
    let (left_hints, center_hints) = status_hints(state);
    let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&left_hints).with_separator("  "),
        center: StatusBarSection::hints(&center_hints).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> (Vec<StatusBarHint<'static>>, Vec<StatusBarHint<'static>>) {
    if state.search.active {
        let left = vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Clear"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
        return (left, Vec::new());
    }
    if state.selected_detail().is_some() {
        let left = vec![
            StatusBarHint::new("Esc", "Close"),
            StatusBarHint::new("r", "Refresh"),
        ];
        return (left, vec![StatusBarHint::new("q", "Quit")]);
    }

    let mut left = vec![
        StatusBarHint::new("j/k", "Move"),
        StatusBarHint::new("Enter", "Detail"),
        StatusBarHint::new("f", "Favorite"),
    ];
    if state.view == View::All && state.can_load_more() {
        left.push(StatusBarHint::new("m", "More"));
    }
    let center = vec![
        StatusBarHint::new("v", "View"),
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("r", "Reload"),
        StatusBarHint::new("q", "Quit"),
    ];
    (left, center)
}

fn entry_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .current_entries()
        .into_iter()
        .map(|entry| {
            let fav = if state.favorites.is_favorite(&entry.name) {
                "♥"
            } else {
                " "
            };
            Line::from(format!("{} {}", fav, format_name(&entry.name)))
        })
        .collect()
}

fn entry_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn panel_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM))
}

fn render_notice(frame: &mut Frame, area: Rect, text: impl Into<String>, color: Color) {
    let paragraph = Paragraph::new(text.into())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn overlay_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn spinner(tick: u64) -> &'static str {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}

/// Decimetres/hectograms to metres/kilograms, without a trailing `.0`.
fn tenths(value: u32) -> String {
    format!("{}", f64::from(value) / 10.0)
}

pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
                None => "".to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
