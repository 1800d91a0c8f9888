use contacts_core::{
    Contact, ContactController, ContactDraft, ContactField, ContactId, ControllerConfig,
    ControllerError, FieldErrorReason, ManualClock, MemoryContactRepository, NotificationKind,
    StaticSource,
};

type TestController = ContactController<MemoryContactRepository, ManualClock>;

fn seeded(contacts: Vec<Contact>) -> (TestController, ManualClock) {
    let clock = ManualClock::new();
    let controller = ContactController::with_parts(
        MemoryContactRepository::new(),
        clock.clone(),
        ControllerConfig::immediate(),
        &StaticSource::new(contacts),
    )
    .unwrap();
    (controller, clock)
}

fn sample_contacts() -> Vec<Contact> {
    vec![
        Contact::new(ContactId(1), "Leanne Graham", "sincere@april.biz", "1-770-736-8031"),
        Contact::new(ContactId(2), "Ervin Howell", "shanna@melissa.tv", "010-692-6593"),
        Contact::new(ContactId(3), "Clementine Bauch", "nathan@yesenia.net", "1-463-123-4447"),
    ]
}

fn validation_fields(err: ControllerError) -> Vec<ContactField> {
    match err {
        ControllerError::Validation(err) => err.fields(),
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn add_shows_new_contact_as_not_favorite() {
    let (mut controller, _) = seeded(Vec::new());
    controller
        .add(&ContactDraft::new("Jess", "jess@x.com", "555-0101"))
        .unwrap();

    let visible = controller.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Jess");
    assert!(!visible[0].is_favorite);
}

#[test]
fn each_invalid_field_is_reported_alone() {
    let (mut controller, _) = seeded(sample_contacts());

    let err = controller
        .add(&ContactDraft::new("", "jess@x.com", "555-0101"))
        .unwrap_err();
    assert_eq!(validation_fields(err), vec![ContactField::Name]);

    let err = controller
        .add(&ContactDraft::new("Jess", "not-an-email", "555-0101"))
        .unwrap_err();
    match err {
        ControllerError::Validation(err) => {
            assert_eq!(err.fields(), vec![ContactField::Email]);
            let email = err.field(ContactField::Email).unwrap();
            assert_eq!(email.reason, FieldErrorReason::Invalid);
            assert_eq!(email.message(), "Email is invalid");
        }
        other => panic!("expected validation error, got {other}"),
    }

    let err = controller
        .add(&ContactDraft::new("Jess", "jess@x.com", "   "))
        .unwrap_err();
    assert_eq!(validation_fields(err), vec![ContactField::Phone]);

    assert_eq!(controller.contacts(), sample_contacts().as_slice());
}

#[test]
fn delete_then_undo_restores_identical_contact() {
    let (mut controller, _) = seeded(sample_contacts());
    controller.toggle_favorite(ContactId(2));
    let before = controller.get(ContactId(2)).cloned().unwrap();
    let count_before = controller.contacts().len();

    assert!(controller.delete(ContactId(2)));
    assert_eq!(controller.contacts().len(), count_before - 1);
    assert!(controller.get(ContactId(2)).is_none());
    assert_eq!(
        controller.notification().unwrap().kind,
        NotificationKind::Deletable
    );

    assert_eq!(controller.undo_delete(), Some(ContactId(2)));
    assert_eq!(controller.get(ContactId(2)), Some(&before));
    assert_eq!(controller.contacts().len(), count_before);
    assert!(controller.pending_deletion().is_none());
    assert_eq!(
        controller.notification().unwrap().message,
        "Ervin Howell restored!"
    );
}

#[test]
fn last_delete_wins_for_undo() {
    let (mut controller, _) = seeded(sample_contacts());
    assert!(controller.delete(ContactId(1)));
    assert!(controller.delete(ContactId(2)));

    assert_eq!(controller.undo_delete(), Some(ContactId(2)));
    assert!(controller.get(ContactId(1)).is_none());
    assert!(controller.get(ContactId(2)).is_some());
    assert_eq!(controller.undo_delete(), None);
}

#[test]
fn toggle_favorite_on_missing_id_changes_nothing() {
    let (mut controller, _) = seeded(sample_contacts());
    let before = controller
        .visible()
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();

    assert_eq!(controller.toggle_favorite(ContactId(404)), None);

    let after = controller
        .visible()
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    assert_eq!(before, after);
    assert!(controller.notification().is_none());
}

#[test]
fn delete_missing_id_is_silent() {
    let (mut controller, _) = seeded(sample_contacts());
    assert!(!controller.delete(ContactId(404)));
    assert!(controller.notification().is_none());
    assert!(controller.pending_deletion().is_none());
    assert_eq!(controller.undo_delete(), None);
}

#[test]
fn favorites_sort_alphabetically_regardless_of_insertion_order() {
    let (mut controller, _) = seeded(Vec::new());
    let bob = controller
        .add(&ContactDraft::new("Bob", "bob@x.com", "2"))
        .unwrap();
    let ann = controller
        .add(&ContactDraft::new("Ann", "ann@x.com", "1"))
        .unwrap();
    controller.toggle_favorite(bob);
    controller.toggle_favorite(ann);

    let names = controller
        .visible()
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Ann", "Bob"]);
}

#[test]
fn search_term_filters_visible_list_and_summary() {
    let (mut controller, _) = seeded(sample_contacts());
    controller.toggle_favorite(ContactId(3));
    controller.set_search_term("ERV");

    let names = controller
        .visible()
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Ervin Howell"]);
    assert_eq!(
        controller.summary().to_string(),
        "Showing 1 of 3 contacts · 1 favorited"
    );

    controller.set_search_term("zzz");
    let empty = controller.empty_state().unwrap();
    assert_eq!(empty.headline(), "No contacts found");
}

#[test]
fn insights_track_most_recent_add() {
    let (mut controller, _) = seeded(sample_contacts());
    controller
        .add(&ContactDraft::new("zoe", "zoe@x.com", "9"))
        .unwrap();
    controller.toggle_favorite(ContactId(1));

    let insights = controller.insights();
    assert_eq!(insights.total, 4);
    assert_eq!(insights.favorites, 1);
    assert_eq!(insights.unique_initials, 4);
    assert_eq!(insights.most_recent.as_deref(), Some("zoe"));
    assert_eq!(controller.favorite_count(), 1);
}
