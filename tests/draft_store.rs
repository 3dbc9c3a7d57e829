use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use pushkind_kp::domain::charge::ChargeItem;
use pushkind_kp::domain::discount::DiscountPolicy;
use pushkind_kp::domain::event_format::ServiceGroup;
use pushkind_kp::domain::proposal::ProposalDraft;
use pushkind_kp::domain::types::{BenefitId, CatalogDishId, DraftKey, SubcategoryId, TemplateId};
use pushkind_kp::domain::units::Portion;
use pushkind_kp::draft::Autosave;
use pushkind_kp::repository::DraftWriter;
use pushkind_kp::repository::draft::DieselDraftRepository;
use pushkind_kp::services::draft::{autosave_tick, discard_draft, restore_draft, save_draft};
use pushkind_kp::steps::Step;

mod common;

/// A draft exercising every nested structure the store must round-trip.
fn populated_draft() -> ProposalDraft {
    let mut draft = ProposalDraft::default();
    draft.client_name = "ООО Ромашка".to_string();
    draft.event_date = NaiveDate::from_ymd_opt(2026, 9, 12);
    draft.event_time = "18:00".to_string();
    draft.venue = "Лофт на Неве".to_string();
    draft.set_service_group(ServiceGroup::Catering);
    draft.guest_count = Some(40);

    let dish = CatalogDishId::new(7).unwrap();
    draft.toggle_catalog_dish(dish);
    draft.ledger.set_price_override(dish, Some(45.0));
    draft
        .ledger
        .set_portion_override(dish, Some(Portion::new("150/75")));
    let local = draft.ledger.add_custom_dish(40);
    {
        let custom = draft.ledger.custom_dish_mut(local).unwrap();
        custom.name = "Фирменный торт".to_string();
        custom.price = 3000.0;
    }
    draft
        .ledger
        .equipment
        .push(ChargeItem::new("Посуда", 40, 50.0).with_subcategory(SubcategoryId::new(1).unwrap()));
    draft
        .ledger
        .services
        .push(ChargeItem::new("Официанты", 4, 2500.0));
    draft.ledger.set_loss_charge(1000.0);
    draft.ledger.set_transport_cost(2000.0);

    let format = draft.formats.create("Банкет");
    draft.formats.set_time_window(format, "18:00–23:00");
    draft.formats.set_guest_count(format, 40);
    draft
        .formats
        .add_dish(format, pushkind_kp::domain::dish::DishKey::Catalog(dish));

    let mut overrides = BTreeMap::new();
    overrides.insert(SubcategoryId::new(1).unwrap(), BenefitId::new(2).unwrap());
    draft.discount = DiscountPolicy::Scoped {
        menu: Some(BenefitId::new(1).unwrap()),
        equipment_general: None,
        equipment_by_subcategory: overrides,
        service: None,
    };
    draft.cashback.benefit = Some(BenefitId::new(3).unwrap());

    draft.template = Some(TemplateId::new(1).unwrap());
    draft.delivery.by_email = true;
    draft.delivery.set_email_message("Добрый день!");
    draft.step = Step::Constructor;
    draft
}

#[test]
fn test_restore_reproduces_every_field() {
    let test_db = common::TestDb::new("test_restore_reproduces_every_field.db");
    let repo = DieselDraftRepository::new(test_db.pool());
    let draft = populated_draft();

    save_draft(&repo, &draft).unwrap();
    let restored = restore_draft(&repo, draft.draft_key).unwrap();
    assert_eq!(restored, draft);

    // Restoring twice yields the same state as restoring once.
    let again = restore_draft(&repo, draft.draft_key).unwrap();
    assert_eq!(again, restored);
}

#[test]
fn test_corrupt_payload_restores_to_fresh_draft() {
    let test_db = common::TestDb::new("test_corrupt_payload_restores.db");
    let repo = DieselDraftRepository::new(test_db.pool());
    let key = DraftKey::new();

    repo.upsert_draft(key, "{definitely not json").unwrap();
    let restored = restore_draft(&repo, key).unwrap();
    assert_eq!(restored.draft_key, key);
    assert_eq!(restored.step, Step::ClientAndEvent);
    assert!(restored.ledger.selected_dishes().is_empty());
}

#[test]
fn test_autosave_flushes_after_quiet_period() {
    let test_db = common::TestDb::new("test_autosave_flushes.db");
    let repo = DieselDraftRepository::new(test_db.pool());
    let draft = populated_draft();
    let mut autosave = Autosave::default();

    let start = Instant::now();
    autosave.mark_dirty(start);

    // Still within the debounce window: nothing written.
    assert!(!autosave_tick(&repo, &mut autosave, &draft, start).unwrap());
    assert!(restore_draft(&repo, draft.draft_key).unwrap() != draft);

    let later = start + Duration::from_secs(1);
    assert!(autosave_tick(&repo, &mut autosave, &draft, later).unwrap());
    assert_eq!(restore_draft(&repo, draft.draft_key).unwrap(), draft);
}

#[test]
fn test_discard_clears_slot_and_disarms_timer() {
    let test_db = common::TestDb::new("test_discard_clears_slot.db");
    let repo = DieselDraftRepository::new(test_db.pool());
    let draft = populated_draft();
    let mut autosave = Autosave::default();

    save_draft(&repo, &draft).unwrap();
    autosave.mark_dirty(Instant::now());
    discard_draft(&repo, &mut autosave, draft.draft_key).unwrap();

    // The slot is empty and no pending timer can write it back.
    let restored = restore_draft(&repo, draft.draft_key).unwrap();
    assert_eq!(restored.client_name, "");
    assert!(!autosave.is_pending());
    let never = autosave_tick(
        &repo,
        &mut autosave,
        &draft,
        Instant::now() + Duration::from_secs(10),
    )
    .unwrap();
    assert!(!never);
}
