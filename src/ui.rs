use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use tracing::{error, warn};

use crate::auth::{route_after_auth, AuthOutcome, IdentityProvider, Route};
use crate::board::{cycle, Notice, NoticeLevel, Operation, TaskBoard};
use crate::config::{save_config, Config};
use crate::error::{Result, TaskflowError};
use crate::filter::Choice;
use crate::project::{completion_percentage, ProjectSummary};
use crate::task::{
    normalize_category, parse_due_date, Priority, Task, TaskDraft, TaskStatus, CATEGORIES,
};

const TICK: Duration = Duration::from_millis(250);

struct Palette {
    fg: Color,
    bg: Color,
    accent: Color,
    muted: Color,
}

impl Palette {
    fn for_mode(dark: bool) -> Self {
        if dark {
            Self {
                fg: Color::Gray,
                bg: Color::Black,
                accent: Color::Cyan,
                muted: Color::DarkGray,
            }
        } else {
            Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::Gray,
            }
        }
    }
}

pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    board: &mut TaskBoard,
    identity: &dyn IdentityProvider,
    config: &mut Config,
    requested: Option<Route>,
) -> io::Result<()> {
    match identity.current_user().await {
        Ok(user) => enter(terminal, board, &AuthOutcome::from(user), requested.clone()).await?,
        Err(err) => {
            error!(error = %err, "failed to restore session");
            board.notify(NoticeLevel::Error, "Failed to restore session. Please sign in.");
            board.navigate(Route::Login);
        }
    }

    loop {
        board.expire_notices(Instant::now());
        draw(terminal, board)?;

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('q') {
            return Ok(());
        }
        // controls stay disabled while a store call is in flight
        if board.is_busy() {
            continue;
        }

        if board.route == Route::Login {
            if key.code == KeyCode::Enter {
                sign_in(terminal, board, identity, requested.clone()).await?;
            }
            continue;
        }

        match key.code {
            KeyCode::Char('d') => {
                config.theme.dark_mode = board.toggle_dark_mode();
                if let Err(err) = save_config(config) {
                    warn!(error = %err, "failed to persist theme");
                }
                continue;
            }
            KeyCode::Char('o') => {
                match identity.sign_out().await {
                    Ok(()) => {
                        board.user = None;
                        board.tasks.clear();
                        board.navigate(Route::Login);
                    }
                    Err(err) => {
                        error!(error = %err, "sign out failed");
                        board.notify(NoticeLevel::Error, "Failed to sign out. Please try again.");
                    }
                }
                continue;
            }
            KeyCode::Char('r') => {
                board.begin(Operation::Fetch);
                draw(terminal, board)?;
                board.refresh().await.ok();
                continue;
            }
            KeyCode::Tab => {
                let next = match board.route {
                    Route::Tasks => Route::Projects,
                    _ => Route::Tasks,
                };
                board.navigate(next);
                continue;
            }
            _ => {}
        }

        match board.route.clone() {
            Route::Tasks => handle_tasks_key(terminal, board, key.code).await?,
            Route::Projects => handle_projects_key(terminal, board, key.code).await?,
            Route::ProjectDetail(_) => handle_detail_key(terminal, board, key.code).await?,
            Route::Login => {}
        }
    }
}

/// Applies the outcome of an identity check and loads the landing view.
async fn enter<B: Backend>(
    terminal: &mut Terminal<B>,
    board: &mut TaskBoard,
    outcome: &AuthOutcome,
    requested: Option<Route>,
) -> io::Result<()> {
    let route = route_after_auth(outcome, requested);
    board.user = match outcome {
        AuthOutcome::Authenticated(user) => Some(user.clone()),
        AuthOutcome::NotAuthenticated => None,
    };
    if route == Route::Login {
        board.navigate(route);
        return Ok(());
    }

    board.navigate(Route::Tasks);
    board.begin(Operation::Fetch);
    draw(terminal, board)?;
    board.refresh().await.ok();
    match route {
        Route::ProjectDetail(name) => {
            board.load_project(&name).await.ok();
        }
        other => board.navigate(other),
    }
    Ok(())
}

async fn sign_in<B: Backend>(
    terminal: &mut Terminal<B>,
    board: &mut TaskBoard,
    identity: &dyn IdentityProvider,
    requested: Option<Route>,
) -> io::Result<()> {
    let Some(name) = prompt("User name") else {
        return Ok(());
    };
    match identity.sign_in(&name).await {
        Ok(user) => enter(terminal, board, &AuthOutcome::Authenticated(user), requested).await?,
        Err(err) => {
            error!(error = %err, "sign in failed");
            board.notify(NoticeLevel::Error, format!("Sign in failed: {err}"));
        }
    }
    Ok(())
}

async fn handle_tasks_key<B: Backend>(
    terminal: &mut Terminal<B>,
    board: &mut TaskBoard,
    code: KeyCode,
) -> io::Result<()> {
    match code {
        KeyCode::Up => board.move_selection(-1),
        KeyCode::Down => board.move_selection(1),
        KeyCode::Char('a') => {
            board.cancel_edit();
            submit_form(terminal, board, TaskDraft::default(), Operation::Create).await?;
        }
        KeyCode::Char('e') => {
            if let Some(task) = board.selected() {
                if let Some(form) = board.start_edit(&task.id) {
                    submit_form(terminal, board, form, Operation::Update).await?;
                }
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(task) = board.selected() {
                board.begin(Operation::Update);
                draw(terminal, board)?;
                board.toggle_status(&task.id).await.ok();
            }
        }
        KeyCode::Char('x') => {
            if let Some(task) = board.selected() {
                let answer = prompt(&format!("Delete \"{}\"? (y/N)", task.title));
                if answer.is_some_and(|a| a.eq_ignore_ascii_case("y")) {
                    board.begin(Operation::Delete);
                    draw(terminal, board)?;
                    board.delete(&task.id).await.ok();
                }
            }
        }
        KeyCode::Char('s') => {
            let mut criteria = board.criteria.clone();
            criteria.status = cycle(&criteria.status, &TaskStatus::ALL);
            board.set_criteria(criteria);
        }
        KeyCode::Char('p') => {
            let mut criteria = board.criteria.clone();
            criteria.priority = cycle(&criteria.priority, &Priority::ALL);
            board.set_criteria(criteria);
        }
        KeyCode::Char('c') => {
            let categories: Vec<String> = CATEGORIES.iter().map(|c| c.to_string()).collect();
            let mut criteria = board.criteria.clone();
            criteria.category = cycle(&criteria.category, &categories);
            board.set_criteria(criteria);
        }
        KeyCode::Char('/') => {
            if let Some(text) = prompt("Search tasks (empty clears)") {
                let mut criteria = board.criteria.clone();
                criteria.search_text = text;
                board.set_criteria(criteria);
            }
        }
        KeyCode::Char('0') => board.clear_filters(),
        _ => {}
    }
    Ok(())
}

async fn handle_projects_key<B: Backend>(
    terminal: &mut Terminal<B>,
    board: &mut TaskBoard,
    code: KeyCode,
) -> io::Result<()> {
    match code {
        KeyCode::Up => board.move_selection(-1),
        KeyCode::Down => board.move_selection(1),
        KeyCode::Enter => {
            let projects = board.projects();
            if let Some(project) = projects.get(board.selected_project) {
                board.project_status = Choice::All;
                board.begin(Operation::Fetch);
                draw(terminal, board)?;
                board.load_project(&project.name).await.ok();
            }
        }
        _ => {}
    }
    Ok(())
}

async fn handle_detail_key<B: Backend>(
    terminal: &mut Terminal<B>,
    board: &mut TaskBoard,
    code: KeyCode,
) -> io::Result<()> {
    match code {
        KeyCode::Up => board.move_selection(-1),
        KeyCode::Down => board.move_selection(1),
        KeyCode::Char('s') => board.cycle_project_status(),
        KeyCode::Esc | KeyCode::Backspace => board.navigate(Route::Projects),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let selected = board.project_view_tasks().into_iter().nth(board.selected_task);
            if let Some(task) = selected {
                board.begin(Operation::Update);
                draw(terminal, board)?;
                board.toggle_status(&task.id).await.ok();
            }
        }
        _ => {}
    }
    Ok(())
}

async fn submit_form<B: Backend>(
    terminal: &mut Terminal<B>,
    board: &mut TaskBoard,
    base: TaskDraft,
    op: Operation,
) -> io::Result<()> {
    match read_draft(base) {
        Ok(Some(draft)) => {
            board.begin(op);
            draw(terminal, board)?;
            board.submit(draft).await.ok();
        }
        Ok(None) => board.cancel_edit(),
        Err(err) => {
            board.cancel_edit();
            board.notify(NoticeLevel::Error, err.to_string());
        }
    }
    Ok(())
}

/// Walks the task form field by field; blank input keeps the shown value.
fn read_draft(base: TaskDraft) -> Result<Option<TaskDraft>> {
    let mut draft = base;

    let Some(title) = prompt(&field_label("Title", &draft.title)) else {
        return Ok(None);
    };
    if !title.is_empty() {
        draft.title = title;
    }

    let current = draft.description.clone().unwrap_or_default();
    let Some(description) = prompt(&field_label("Description (- clears)", &current)) else {
        return Ok(None);
    };
    draft.description = edit_description(draft.description, &description);

    let Some(status) = prompt(&field_label("Status", draft.status.as_str())) else {
        return Ok(None);
    };
    if !status.is_empty() {
        draft.status = TaskStatus::parse(&status)
            .ok_or_else(|| TaskflowError::validation(format!("Unknown status \"{status}\"")))?;
    }

    let Some(priority) = prompt(&field_label("Priority", draft.priority.as_str())) else {
        return Ok(None);
    };
    if !priority.is_empty() {
        draft.priority = Priority::parse(&priority).ok_or_else(|| {
            TaskflowError::validation(format!("Unknown priority \"{priority}\""))
        })?;
    }

    let Some(category) = prompt(&field_label("Category", &draft.category)) else {
        return Ok(None);
    };
    if !category.is_empty() {
        draft.category = normalize_category(&category);
    }

    let due = draft.due_date.format("%Y-%m-%d").to_string();
    let Some(due_date) = prompt(&field_label("Due date (YYYY-MM-DD)", &due)) else {
        return Ok(None);
    };
    if !due_date.is_empty() {
        draft.due_date = parse_due_date(&due_date)?;
    }

    Ok(Some(draft))
}

/// Blank keeps the current description and `-` removes it.
fn edit_description(current: Option<String>, input: &str) -> Option<String> {
    match input {
        "" => current,
        CLEAR_FIELD => None,
        text => Some(text.to_string()),
    }
}

const CLEAR_FIELD: &str = "-";

fn field_label(name: &str, current: &str) -> String {
    if current.is_empty() {
        name.to_string()
    } else {
        format!("{name} [{current}]")
    }
}

fn prompt(message: &str) -> Option<String> {
    disable_raw_mode().ok();
    print!("\r\n{}: ", message);
    io::stdout().flush().ok();
    let mut input = String::new();
    let read = io::stdin().read_line(&mut input);
    enable_raw_mode().ok();
    match read {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, board: &TaskBoard) -> io::Result<()> {
    terminal.draw(|f| render(f, board))?;
    Ok(())
}

pub fn render(f: &mut Frame, board: &TaskBoard) {
    let palette = Palette::for_mode(board.dark_mode);
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().fg(palette.fg).bg(palette.bg)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, chunks[0], board, &palette);
    match &board.route {
        Route::Login => render_login(f, chunks[1], &palette),
        Route::Tasks => render_tasks(f, chunks[1], board, &palette),
        Route::Projects => render_projects(f, chunks[1], board, &palette),
        Route::ProjectDetail(name) => render_project_detail(f, chunks[1], board, name, &palette),
    }
    render_footer(f, chunks[2], board, &palette);

    if let Some(notice) = board.current_notice() {
        render_notice(f, notice);
    }
}

fn render_header(f: &mut Frame, area: Rect, board: &TaskBoard, palette: &Palette) {
    let mut title = String::from(" TaskFlow ");
    if let Some(user) = &board.user {
        title.push_str(&format!("· {} ", user.name));
    }
    if let Some(op) = board.pending() {
        title.push_str(&format!("· {}... ", op.label()));
    }

    let selected = match board.route {
        Route::Projects | Route::ProjectDetail(_) => 1,
        _ => 0,
    };
    let tabs = Tabs::new(vec!["Tasks", "Projects"])
        .select(selected)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        )
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn render_login(f: &mut Frame, area: Rect, palette: &Palette) {
    let text = vec![
        Line::from(Span::styled(
            "Welcome to TaskFlow",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press Enter to sign in, q to quit."),
    ];
    let login = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Sign in"));
    f.render_widget(login, area);
}

fn task_item(task: &Task, palette: &Palette) -> ListItem<'static> {
    let done = task.is_completed();
    let check = if done { "[x] " } else { "[ ] " };
    let title_style = if done {
        Style::default()
            .fg(palette.muted)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(palette.fg)
    };

    let mut spans = vec![
        Span::raw(check),
        Span::styled(task.title.clone(), title_style),
        Span::styled(
            format!("  {}", task.category),
            Style::default().fg(category_color(&task.category)),
        ),
        Span::styled(
            format!("  {}", task.priority),
            Style::default().fg(priority_color(task.priority)),
        ),
    ];
    if !done {
        spans.push(Span::styled(
            format!("  {}", task.status),
            Style::default().fg(palette.accent),
        ));
    }
    spans.push(Span::raw(format!(
        "  (Due: {})",
        task.due_date.format("%b %d, %Y")
    )));
    ListItem::new(Line::from(spans))
}

fn render_tasks(f: &mut Frame, area: Rect, board: &TaskBoard, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let visible = board.visible_tasks();
    let criteria = &board.criteria;
    let noun = if visible.len() == 1 { "task" } else { "tasks" };
    let filters = Line::from(vec![
        Span::raw(format!(" Status: {}", criteria.status)),
        Span::raw(format!("  Priority: {}", criteria.priority)),
        Span::raw(format!("  Category: {}", criteria.category)),
        Span::raw(format!("  Search: \"{}\"", criteria.search_text)),
        Span::styled(
            format!("  {} {} available", visible.len(), noun),
            Style::default().fg(palette.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(filters), chunks[0]);

    let block = Block::default()
        .title(if board.editing().is_some() { "Tasks (editing)" } else { "Tasks" })
        .borders(Borders::ALL);

    if visible.is_empty() {
        let message = if board.can_retry() {
            "Couldn't load tasks. Press r to retry."
        } else if criteria.is_active() {
            "No tasks match your current filters. Try adjusting your search or filters (0 clears them)."
        } else {
            "No tasks yet. Press a to add your first task."
        };
        let empty = Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = visible.iter().map(|t| task_item(t, palette)).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    let mut state = ListState::default();
    state.select(Some(board.selected_task));
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent as usize * width) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled.min(width)))
}

fn project_item(project: &ProjectSummary, palette: &Palette) -> ListItem<'static> {
    let percent = project.completion_percentage();
    let noun = if project.task_count == 1 { "task" } else { "tasks" };
    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{:<12}", project.name),
            Style::default().fg(category_color(&project.name)),
        ),
        Span::raw(format!(" {} {:>3}%", progress_bar(percent, 20), percent)),
        Span::styled(
            format!("  {} {}", project.task_count, noun),
            Style::default().fg(palette.muted),
        ),
    ]))
}

fn render_projects(f: &mut Frame, area: Rect, board: &TaskBoard, palette: &Palette) {
    let projects = board.projects();
    let block = Block::default().title("Projects").borders(Borders::ALL);
    if projects.is_empty() {
        let empty = Paragraph::new("No projects yet. Tasks with a category show up here.")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = projects.iter().map(|p| project_item(p, palette)).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    let mut state = ListState::default();
    state.select(Some(board.selected_project));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_project_detail(
    f: &mut Frame,
    area: Rect,
    board: &TaskBoard,
    name: &str,
    palette: &Palette,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(30), Constraint::Min(1)])
        .split(area);

    let counts = board.project_counts();
    let total = board.project_tasks().len();
    let percent = completion_percentage(counts.completed, total);
    let marker = |choice: &Choice<TaskStatus>| {
        if *choice == board.project_status {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };
    let sidebar = vec![
        Line::from(Span::styled(format!("All: {total}"), marker(&Choice::All))),
        Line::from(Span::styled(
            format!("Not Started: {}", counts.not_started),
            marker(&Choice::Only(TaskStatus::NotStarted)),
        )),
        Line::from(Span::styled(
            format!("In Progress: {}", counts.in_progress),
            marker(&Choice::Only(TaskStatus::InProgress)),
        )),
        Line::from(Span::styled(
            format!("Completed: {}", counts.completed),
            marker(&Choice::Only(TaskStatus::Completed)),
        )),
        Line::from(""),
        Line::from(format!("{} {percent}%", progress_bar(percent, 16))),
    ];
    f.render_widget(
        Paragraph::new(sidebar).block(Block::default().title(name.to_string()).borders(Borders::ALL)),
        chunks[0],
    );

    let tasks = board.project_view_tasks();
    let block = Block::default()
        .title(format!("{} tasks", board.project_status))
        .borders(Borders::ALL);
    if tasks.is_empty() {
        f.render_widget(
            Paragraph::new("No tasks with this status.")
                .alignment(Alignment::Center)
                .block(block),
            chunks[1],
        );
        return;
    }
    let items: Vec<ListItem> = tasks.iter().map(|t| task_item(t, palette)).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    let mut state = ListState::default();
    state.select(Some(board.selected_task));
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_footer(f: &mut Frame, area: Rect, board: &TaskBoard, palette: &Palette) {
    let keys = match board.route {
        Route::Login => "Enter sign in · q quit",
        Route::Tasks => {
            "a add · e edit · Enter toggle · x delete · s/p/c filter · / search · 0 clear · r refresh · Tab projects · d theme · o sign out · q quit"
        }
        Route::Projects => "Enter open · Tab tasks · r refresh · d theme · q quit",
        Route::ProjectDetail(_) => "s status · Enter toggle · Esc back · d theme · q quit",
    };
    f.render_widget(
        Paragraph::new(Span::styled(keys, Style::default().fg(palette.muted))),
        area,
    );
}

fn render_notice(f: &mut Frame, notice: &Notice) {
    let area = f.area();
    let color = match notice.level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Info => Color::Blue,
        NoticeLevel::Error => Color::Red,
    };
    let width = (notice.message.chars().count() as u16 + 4).min(area.width.saturating_sub(2));
    let height = 3;
    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 1);
    let toast_area = Rect::new(x, y, width, height.min(area.height));

    f.render_widget(Clear, toast_area);
    f.render_widget(
        Paragraph::new(notice.message.as_str())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
        toast_area,
    );
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

fn category_color(category: &str) -> Color {
    match category {
        "Work" => Color::Blue,
        "Personal" => Color::Magenta,
        "Health" => Color::Green,
        "Learning" => Color::Yellow,
        _ => Color::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::User;
    use crate::store::MemoryStore;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_renders_tasks_and_projects() {
        let mut board = TaskBoard::new(Arc::new(MemoryStore::new()));
        board.user = Some(User {
            name: "ana".to_string(),
        });
        let mut draft = TaskDraft::new("Grocery shopping");
        draft.category = "Personal".to_string();
        board.submit(draft).await.unwrap();

        let mut terminal = Terminal::new(TestBackend::new(140, 20)).unwrap();
        draw(&mut terminal, &board).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("Grocery shopping"));
        assert!(text.contains("1 task available"));

        board.navigate(Route::Projects);
        draw(&mut terminal, &board).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("Personal"));
        assert!(text.contains("0%"));
    }

    #[test]
    fn test_empty_state_mentions_filters() {
        let mut board = TaskBoard::new(Arc::new(MemoryStore::new()));
        board.criteria.search_text = "zzz".to_string();
        let mut terminal = Terminal::new(TestBackend::new(140, 20)).unwrap();
        draw(&mut terminal, &board).unwrap();
        assert!(screen(&terminal).contains("No tasks match your current filters"));
    }

    #[test]
    fn test_tasks_footer_lists_refresh() {
        let mut board = TaskBoard::new(Arc::new(MemoryStore::new()));
        board.navigate(Route::Tasks);
        let mut terminal = Terminal::new(TestBackend::new(160, 20)).unwrap();
        draw(&mut terminal, &board).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("r refresh"));
        assert!(text.contains("q quit"));
    }

    #[test]
    fn test_description_can_be_kept_replaced_or_cleared() {
        let current = Some("Milk and eggs".to_string());
        assert_eq!(edit_description(current.clone(), ""), current);
        assert_eq!(
            edit_description(current.clone(), "Bread"),
            Some("Bread".to_string())
        );
        assert_eq!(edit_description(current, "-"), None);
        assert_eq!(edit_description(None, ""), None);
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4), "[----]");
        assert_eq!(progress_bar(50, 4), "[##--]");
        assert_eq!(progress_bar(100, 4), "[####]");
    }

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("Title", ""), "Title");
        assert_eq!(field_label("Priority", "Medium"), "Priority [Medium]");
    }
}
