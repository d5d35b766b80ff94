//! Integration tests for the adapter and list reconciliation.

use std::sync::Arc;

use boilrbite::prelude::*;
use parking_lot::Mutex;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq)]
struct Contact {
    id: u64,
    name: String,
    online: bool,
}

fn contact(id: u64, name: &str, online: bool) -> Contact {
    Contact {
        id,
        name: name.to_string(),
        online,
    }
}

const NAME: ViewId = ViewId(10);
const AVATAR: ViewId = ViewId(11);
const STATUS: ViewId = ViewId(12);

#[derive(Debug, Default)]
struct ContactRow {
    label: String,
    has_status: bool,
}

impl RowView for ContactRow {
    fn root_id(&self) -> ViewId {
        ViewId(1)
    }

    fn contains_view(&self, id: ViewId) -> bool {
        id == NAME || id == AVATAR || (self.has_status && id == STATUS)
    }
}

fn contacts_adapter() -> Adapter<Contact, ContactRow> {
    AdapterBuilder::new()
        .layouts([LayoutId(100), LayoutId(200)])
        .clickable_views([NAME, STATUS])
        .same_identity(|a: &Contact, b: &Contact| a.id == b.id)
        .same_content(|a: &Contact, b: &Contact| a.name == b.name && a.online == b.online)
        .view_type_selector(|_, contact: &Contact| {
            if contact.online {
                LayoutId(200).into()
            } else {
                ViewTypeId::DEFAULT
            }
        })
        .bind(|row: &mut ContactRow, contact: &Contact, _| {
            row.label = contact.name.clone();
            row.has_status = contact.online;
        })
        .build()
        .unwrap()
}

#[test]
fn test_mutations_emit_diffs() {
    setup();
    let adapter = contacts_adapter();
    let diffs = Arc::new(Mutex::new(Vec::<ListDiff>::new()));

    let recv = diffs.clone();
    adapter
        .signals()
        .list_submitted
        .connect(move |diff| recv.lock().push(diff.clone()));

    adapter.add_or_update_items(vec![
        contact(1, "Ada", false),
        contact(2, "Grace", true),
        contact(3, "Linus", false),
    ]);
    adapter.add_or_update(contact(2, "Grace", false));
    adapter.remove_items(&[contact(1, "", false), contact(3, "", false)]);

    let diffs = diffs.lock();
    assert_eq!(diffs.len(), 3);
    assert_eq!(diffs[0].inserted().count(), 3);
    assert_eq!(diffs[1].updated().collect::<Vec<_>>(), vec![1]);
    assert_eq!(diffs[2].removed().collect::<Vec<_>>(), vec![0, 2]);

    assert_eq!(*adapter.items(), vec![contact(2, "Grace", false)]);
}

#[test]
fn test_bind_uses_view_type_layout() {
    setup();
    let adapter = contacts_adapter();
    adapter.set_items(vec![contact(1, "Ada", false), contact(2, "Grace", true)]);

    let mut row = ContactRow::default();
    let offline = adapter.bind_row(&mut row, 0).unwrap();
    assert_eq!(offline.layout, LayoutId(100));
    assert_eq!(offline.click_targets, vec![ViewId(1), NAME]);

    let online = adapter.bind_row(&mut row, 1).unwrap();
    assert_eq!(row.label, "Grace");
    assert_eq!(online.layout, LayoutId(200));
    assert_eq!(online.click_targets, vec![ViewId(1), NAME, STATUS]);
}

#[test]
fn test_click_selects_row() {
    setup();
    let adapter = Arc::new(contacts_adapter());
    adapter.set_items(vec![
        contact(1, "Ada", false),
        contact(2, "Grace", true),
        contact(3, "Linus", false),
    ]);

    let selections = Arc::new(Mutex::new(Vec::new()));
    let recv = selections.clone();
    adapter
        .signals()
        .selection_changed
        .connect(move |change: &SelectionChange<Contact>| {
            recv.lock().push((change.old_index, change.new_index))
        });

    let inner = adapter.clone();
    adapter
        .click_signals()
        .position_clicked
        .connect(move |position| {
            inner.set_selected(*position as isize, true);
        });

    adapter.row_clicked(NAME, 2);
    adapter.row_clicked(NAME, 0);
    adapter.row_clicked(NAME, 0);

    assert_eq!(
        *selections.lock(),
        vec![(None, Some(2)), (Some(2), Some(0)), (Some(0), None)]
    );
    assert_eq!(adapter.selected_index(), None);
}

#[test]
fn test_selection_survives_refresh() {
    setup();
    let adapter = contacts_adapter();
    adapter.set_items(vec![contact(1, "Ada", false), contact(2, "Grace", true)]);
    adapter.set_selected(1, true);

    // Server refresh: new contact first, Grace went offline
    adapter.set_items(vec![
        contact(5, "Barbara", true),
        contact(1, "Ada", false),
        contact(2, "Grace", false),
    ]);
    assert_eq!(adapter.selected_index(), Some(2));
    assert_eq!(adapter.selected_item(), Some(contact(2, "Grace", false)));

    adapter.remove(&contact(2, "Grace", false));
    assert_eq!(adapter.selected_index(), None);
}

#[test]
fn test_clear_resets_everything() {
    setup();
    let adapter = contacts_adapter();
    adapter.set_items(vec![contact(1, "Ada", false)]);
    adapter.set_selected(0, true);

    adapter.clear();

    assert!(adapter.is_empty());
    assert_eq!(adapter.selected_index(), None);
    assert_eq!(adapter.layout_for(0), None);
    assert!(!adapter.set_selected(0, true));
}
