//! End-to-end input handling through the plugin list container.

use std::sync::{Arc, Mutex};

use horizon_pluglist::actions::ItemKeyAction;
use horizon_pluglist::config::{PlatformSetting, PluginListConfig};
use horizon_pluglist::ScopedFlag;
use horizon_pluglist::model::{Item, PluginDescriptor, PluginGroup, SelectionKind};
use horizon_pluglist::widget::{
    ContextMenu, ContextMenuEvent, FocusInEvent, FocusReason, Key, KeyPressEvent, KeyboardModifiers, ListEvent,
    ListViewport, MouseButton, MouseMoveEvent, MousePressEvent, PluginAction, PluginActionMenu, PluginList, Point,
    SelectionSummary,
};

const ROW: f32 = 32.0;

/// A viewport of fixed-height rows.
///
/// When it watches the list's focus suppression flag, each focus request
/// records whether the flag was raised at that moment, which is when the
/// toolkit would deliver the matching focus-in event.
struct RowViewport {
    rows: usize,
    visible: usize,
    focused: Vec<String>,
    suppression: Option<ScopedFlag>,
    focused_while_suppressed: Vec<bool>,
    menus: Vec<ContextMenu>,
}

impl RowViewport {
    fn new(rows: usize, visible: usize) -> Self {
        Self {
            rows,
            visible,
            focused: Vec::new(),
            suppression: None,
            focused_while_suppressed: Vec::new(),
            menus: Vec::new(),
        }
    }

    fn watching(mut self, suppression: ScopedFlag) -> Self {
        self.suppression = Some(suppression);
        self
    }
}

impl ListViewport for RowViewport {
    fn item_at(&self, point: Point) -> Option<usize> {
        let row = (point.y / ROW).floor();
        (row >= 0.0 && (row as usize) < self.rows).then_some(row as usize)
    }

    fn visible_row_count(&self) -> usize {
        self.visible
    }

    fn scroll_to_item(&mut self, _item: &Item) {}

    fn focus_item(&mut self, item: &Item) {
        self.focused.push(item.plugin_id());
        if let Some(suppression) = &self.suppression {
            self.focused_while_suppressed.push(suppression.is_raised());
        }
    }

    fn show_context_menu(&mut self, menu: ContextMenu, _global_pos: Point) {
        self.menus.push(menu);
    }
}

/// Route selection and input logs to the test output when `RUST_LOG` asks for them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config(platform: PlatformSetting) -> PluginListConfig {
    PluginListConfig {
        platform,
        ..PluginListConfig::default()
    }
}

fn panel(platform: PlatformSetting, rows: usize) -> PluginList {
    let mut list = PluginList::new(config(platform));
    list.set_groups(vec![PluginGroup::with_descriptors(
        "Downloaded",
        (0..rows).map(|i| PluginDescriptor::new(format!("p{i:02}"), format!("Plugin {i:02}"), "1.0")),
    )]);
    list
}

fn press(key: Key, modifiers: KeyboardModifiers) -> ListEvent {
    ListEvent::KeyPress(KeyPressEvent::new(key, modifiers))
}

fn click(row: usize, button: MouseButton, modifiers: KeyboardModifiers) -> ListEvent {
    let local = Point::new(10.0, row as f32 * ROW + ROW / 2.0);
    ListEvent::MousePress(MousePressEvent::new(button, local, local, modifiers))
}

#[test]
fn test_keyboard_scenario() {
    init_tracing();
    let mut list = panel(PlatformSetting::Other, 10);
    let mut viewport = RowViewport::new(10, 4);

    list.handle_event(&click(3, MouseButton::Left, KeyboardModifiers::NONE), &mut viewport);
    list.handle_event(&press(Key::ArrowDown, KeyboardModifiers::SHIFT), &mut viewport);
    list.handle_event(&press(Key::ArrowDown, KeyboardModifiers::SHIFT), &mut viewport);
    list.handle_event(&press(Key::ArrowUp, KeyboardModifiers::SHIFT), &mut viewport);
    assert_eq!(list.selection().selected_indices(), vec![3, 4]);

    list.handle_event(&click(7, MouseButton::Left, KeyboardModifiers::NONE), &mut viewport);
    assert_eq!(list.selection().selected_indices(), vec![7]);
    assert_eq!(list.selection().kind(), SelectionKind::Single);
    assert_eq!(viewport.focused.last().map(String::as_str), Some("p07"));

    list.handle_event(&press(Key::PageDown, KeyboardModifiers::SHIFT), &mut viewport);
    assert_eq!(list.selection().selected_indices(), vec![7, 8, 9]);
}

#[test]
fn test_empty_panel_ignores_keys() {
    let mut list = panel(PlatformSetting::Other, 0);
    let mut viewport = RowViewport::new(0, 4);
    for key in [Key::ArrowUp, Key::ArrowDown, Key::PageUp, Key::PageDown, Key::Home, Key::End] {
        for modifiers in [KeyboardModifiers::NONE, KeyboardModifiers::SHIFT] {
            assert!(!list.handle_event(&press(key, modifiers), &mut viewport));
        }
    }
    assert!(!list.handle_event(&press(Key::A, KeyboardModifiers::CTRL), &mut viewport));
    assert!(!list.handle_event(&click(0, MouseButton::Left, KeyboardModifiers::NONE), &mut viewport));
    assert_eq!(list.selection().kind(), SelectionKind::Empty);
}

#[test]
fn test_modifier_clicks_per_platform() {
    let mut mac = panel(PlatformSetting::MacOs, 6);
    let mut viewport = RowViewport::new(6, 6);
    mac.handle_event(&click(1, MouseButton::Left, KeyboardModifiers::META), &mut viewport);
    mac.handle_event(&click(4, MouseButton::Left, KeyboardModifiers::META), &mut viewport);
    assert_eq!(mac.selection().selected_indices(), vec![1, 4]);
    assert_eq!(mac.selection().kind(), SelectionKind::Mixed);

    let mut other = panel(PlatformSetting::Other, 6);
    other.handle_event(&click(1, MouseButton::Left, KeyboardModifiers::CTRL), &mut viewport);
    other.handle_event(&click(4, MouseButton::Left, KeyboardModifiers::CTRL), &mut viewport);
    assert_eq!(other.selection().selected_indices(), vec![1, 4]);
}

#[test]
fn test_router_focus_does_not_echo() {
    let mut list = panel(PlatformSetting::Other, 5);
    let mut viewport = RowViewport::new(5, 5).watching(list.focus_suppression());
    list.handle_event(&click(1, MouseButton::Left, KeyboardModifiers::NONE), &mut viewport);
    list.handle_event(&click(3, MouseButton::Left, KeyboardModifiers::SHIFT), &mut viewport);

    // Focus moving onto a range member from outside keeps the range
    let item = list.selection().items()[2].clone();
    list.handle_event(&ListEvent::FocusIn(FocusInEvent::new(item, FocusReason::Mouse)), &mut viewport);
    assert_eq!(list.selection().selected_indices(), vec![1, 2, 3]);

    // The router moves focus itself only with the suppression flag raised
    list.handle_event(&press(Key::Home, KeyboardModifiers::NONE), &mut viewport);
    assert_eq!(viewport.focused.last().map(String::as_str), Some("p00"));
    assert!(!viewport.focused_while_suppressed.is_empty());
    assert!(viewport.focused_while_suppressed.iter().all(|&raised| raised));
    assert!(!list.focus_suppression().is_raised());

    // A focus-in arriving while the flag is raised is ignored
    list.handle_event(&press(Key::ArrowDown, KeyboardModifiers::SHIFT), &mut viewport);
    let suppression = list.focus_suppression();
    let guard = suppression.raise();
    let last = list.selection().items()[4].clone();
    list.handle_event(&ListEvent::FocusIn(FocusInEvent::new(last.clone(), FocusReason::Other)), &mut viewport);
    assert_eq!(list.selection().selected_indices(), vec![0, 1]);
    drop(guard);

    list.handle_event(&press(Key::ArrowUp, KeyboardModifiers::SHIFT), &mut viewport);
    list.handle_event(&ListEvent::FocusIn(FocusInEvent::new(last, FocusReason::Other)), &mut viewport);
    assert_eq!(list.selection().selected_indices(), vec![4]);
}

#[test]
fn test_context_menu_and_actions() {
    init_tracing();
    let mut list = panel(PlatformSetting::Other, 4);
    list.set_menu_provider(PluginActionMenu);
    let dispatched = Arc::new(Mutex::new(Vec::new()));
    let sink = dispatched.clone();
    list.set_action_dispatcher(move |action: ItemKeyAction, selection: &[Item]| {
        sink.lock().unwrap().push((action, selection.iter().map(Item::plugin_id).collect::<Vec<_>>()));
    });
    let mut viewport = RowViewport::new(4, 4);

    list.handle_event(&press(Key::A, KeyboardModifiers::CTRL), &mut viewport);
    list.handle_event(&click(2, MouseButton::Right, KeyboardModifiers::NONE), &mut viewport);
    assert_eq!(list.selection().kind(), SelectionKind::All);
    assert_eq!(viewport.menus.len(), 1);
    assert!(viewport.menus[0].is_enabled(PluginAction::Disable));
    assert!(!viewport.menus[0].is_enabled(PluginAction::Enable));

    list.handle_event(&ListEvent::ContextMenu(ContextMenuEvent::from_keyboard(Point::ZERO)), &mut viewport);
    assert_eq!(viewport.menus.len(), 2);

    list.handle_event(&press(Key::Delete, KeyboardModifiers::NONE), &mut viewport);
    let dispatched = dispatched.lock().unwrap();
    assert_eq!(dispatched.len(), 1);
    assert_eq!(dispatched[0].0, ItemKeyAction::Delete);
    assert_eq!(dispatched[0].1, ["p00", "p01", "p02", "p03"]);
}

#[test]
fn test_hover_follows_pointer() {
    let mut list = panel(PlatformSetting::Other, 3);
    let mut viewport = RowViewport::new(3, 3);
    let revision = list.selection().revision();
    let moved = MouseMoveEvent::new(Point::new(1.0, ROW * 1.5), Point::ZERO);
    list.handle_event(&ListEvent::MouseMove(moved), &mut viewport);
    assert_eq!(list.selection().hovered_item().map(Item::plugin_id).as_deref(), Some("p01"));
    // Hover is not a selection change
    assert_eq!(list.selection().revision(), revision);

    list.handle_event(&ListEvent::MouseLeave, &mut viewport);
    assert!(list.selection().hovered_item().is_none());
}

#[test]
fn test_announcements() {
    let mut list = panel(PlatformSetting::Other, 5);
    let spoken = Arc::new(Mutex::new(Vec::new()));
    let sink = spoken.clone();
    list.set_announcer(move |summary: &SelectionSummary| sink.lock().unwrap().push(summary.to_string()));
    let mut viewport = RowViewport::new(5, 5);

    list.handle_event(&click(0, MouseButton::Left, KeyboardModifiers::NONE), &mut viewport);
    list.handle_event(&press(Key::End, KeyboardModifiers::SHIFT), &mut viewport);
    list.remove_plugin("p04");
    assert_eq!(
        *spoken.lock().unwrap(),
        ["1 item selected", "5 items selected", "4 items selected"]
    );
}
