use backoffice::gallery;
use backoffice::model::{
    Activity, ActivityDraft, ActivityPatch, BonPlan, BonPlanDraft, BonPlanPatch, NewsletterSubscriber, Partner,
    PartnerDirectory, PartnerDraft, Promotion, PromotionDraft, PromotionPatch, TravelOffer, TravelOfferPatch,
};
use backoffice::resource::{AccessScope, LoadState, MutationError};
use backoffice::ui::{FormMode, Formatter, ListView, ResourcePage};
use chrono::{TimeZone, Utc};
use table_store::mock::MockTable;
use table_store::{sequential_ids, BucketActor, StoreError, TableActor, TableClient};
use uuid::Uuid;

// --- Helpers ---

fn partner_table() -> PartnerDirectory {
    let (table, client) = TableActor::<Partner>::new(16, Uuid::new_v4);
    tokio::spawn(table.run(()));
    client
}

fn owned_table<T>(partners: &PartnerDirectory) -> TableClient<T>
where
    T: table_store::Record<Id = u64, Context = PartnerDirectory>,
{
    let (table, client) = TableActor::<T>::new(16, sequential_ids(1));
    tokio::spawn(table.run(partners.clone()));
    client
}

fn promotion(id: u64, code: &str) -> Promotion {
    Promotion {
        id,
        title: format!("Promo {id}"),
        description: "Offre de saison".into(),
        code: code.into(),
        discount_percent: 15.0,
        valid_from: None,
        valid_until: None,
        image_url: None,
        is_active: true,
        partner_id: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, id as u32, 9, 0, 0).unwrap(),
    }
}

fn travel_offer(id: u64) -> TravelOffer {
    TravelOffer {
        id,
        title: format!("Séjour {id}"),
        destination: "Crète".into(),
        description: "Vol + hôtel".into(),
        price: 899.0,
        duration_days: 7,
        departure_date: None,
        return_date: None,
        included: vec!["Vol".into()],
        image_url: None,
        images: Vec::new(),
        is_active: true,
        created_at: Utc.with_ymd_and_hms(2026, 2, id as u32, 9, 0, 0).unwrap(),
    }
}

// --- Create ---

#[tokio::test]
async fn test_create_bon_plan_appears_once_with_generated_id() {
    let partners = partner_table();
    let mut page = ResourcePage::new(owned_table::<BonPlan>(&partners), Formatter::default());

    assert!(page.load().await.is_empty());
    assert_eq!(page.view(), ListView::Empty);

    page.open_create();
    *page.draft_mut() = BonPlanDraft {
        title: "Happy Hour".into(),
        description: "2-for-1".into(),
        is_active: true,
        ..BonPlanDraft::default()
    };
    let created = page.submit().await.expect("create failed");

    assert_eq!(created.id, 1);
    assert_eq!(page.rows().len(), 1);
    let row = &page.rows()[0];
    assert_eq!(row.title, "Happy Hour");
    assert_eq!(row.description, "2-for-1");
    assert!(row.is_active);

    // the dialog closed and went back to create defaults
    assert!(!page.form().is_open());
    assert_eq!(page.form().mode(), &FormMode::Create);
    assert!(page.form().draft().title.is_empty());
    assert!(!page.toasts().has_errors());

    // newest first: a second plan is prepended
    page.open_create();
    page.draft_mut().title = "Brunch".into();
    page.draft_mut().description = "Le dimanche".into();
    page.submit().await.unwrap();
    let ids: Vec<_> = page.rows().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_validation_blocks_submission() {
    // no insert expectation: any request reaching the store would fail the test
    let mock = MockTable::<BonPlan>::new();
    let mut page = ResourcePage::new(mock.client(), Formatter::default());

    page.open_create();
    page.draft_mut().title = "   ".into();
    let result = page.submit().await;

    match result {
        Err(MutationError::Invalid(errors)) => {
            assert!(errors.contains("title"));
            assert!(errors.contains("description"));
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
    assert!(page.form().is_open(), "the dialog stays open on failure");
    assert_eq!(page.form().draft().title, "   ");
    assert!(page.rows().is_empty());
    assert!(page.toasts().has_errors());
    mock.verify();
}

// --- Update ---

#[tokio::test]
async fn test_toggle_promotion_changes_only_the_flag() {
    let partners = partner_table();
    let seeded = vec![promotion(3, "WINTER"), promotion(7, "SPRING")];
    let (table, client) = TableActor::<Promotion>::new(16, sequential_ids(8));
    tokio::spawn(table.seed(seeded).run(partners.clone()));

    let mut page = ResourcePage::new(client.clone(), Formatter::default());
    page.load().await;
    let ids: Vec<_> = page.rows().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![7, 3]);

    let before = client.get(7).await.unwrap().unwrap();
    page.update(7, PromotionPatch::active(false)).await.unwrap();

    let after = client.get(7).await.unwrap().unwrap();
    assert_eq!(after, Promotion { is_active: false, ..before });
    assert_eq!(page.store().get(&7), Some(&after));
    assert_eq!(page.store().get(&3), Some(&promotion(3, "WINTER")));

    // ids continue after the seed
    let fresh = client
        .insert(PromotionDraft {
            title: "Automne".into(),
            code: "fall".into(),
            ..PromotionDraft::default()
        })
        .await
        .unwrap();
    assert_eq!(fresh.id, 8);
}

#[tokio::test]
async fn test_edit_form_submits_an_update() {
    let partners = partner_table();
    let owner = partners
        .insert(PartnerDraft {
            name: "Eaux Vives".into(),
            ..PartnerDraft::default()
        })
        .await
        .unwrap();
    let client = owned_table::<Activity>(&partners);
    let kayak = client
        .insert(ActivityDraft {
            name: "Kayak".into(),
            description: "Descente des gorges".into(),
            location: "Ardèche".into(),
            price: 35.0,
            image_url: Some("https://cdn/kayak.png".into()),
            partner_id: Some(owner.id),
            ..ActivityDraft::default()
        })
        .await
        .unwrap();

    let mut page = ResourcePage::new(client.clone(), Formatter::default());
    page.load().await;
    assert!(!page.open_edit(&99));
    assert!(page.open_edit(&kayak.id));
    assert_eq!(page.form().mode(), &FormMode::Edit(kayak.id));
    assert_eq!(page.form().draft().images, vec!["https://cdn/kayak.png"]);

    page.draft_mut().price = 42.5;
    let saved = page.submit().await.unwrap();

    assert_eq!(saved.price, 42.5);
    assert_eq!(saved.name, "Kayak");
    assert_eq!(saved.partner_id, Some(owner.id));
    assert_eq!(page.rows(), &[saved.clone()]);
    assert_eq!(page.form().mode(), &FormMode::Create);
    assert_eq!(client.get(kayak.id).await.unwrap(), Some(saved));
}

#[tokio::test]
async fn test_offline_update_keeps_cache() {
    let mut mock = MockTable::<TravelOffer>::new();
    mock.expect_select().return_ok(vec![travel_offer(5), travel_offer(3)]);
    mock.expect_update(5).return_err(StoreError::Unavailable);

    let mut page = ResourcePage::new(mock.client(), Formatter::default());
    page.load().await;
    let before = page.rows().to_vec();

    let patch = TravelOfferPatch {
        is_active: Some(false),
        ..TravelOfferPatch::default()
    };
    let result = page.update(5, patch).await;

    assert!(matches!(result, Err(MutationError::Remote(StoreError::Unavailable))));
    assert_eq!(page.rows(), before.as_slice());
    assert!(page.store().get(&5).is_some_and(|offer| offer.is_active));
    assert!(page.toasts().latest().is_some_and(|t| t.is_error()));
    mock.verify();
}

#[tokio::test]
async fn test_emptying_the_gallery_clears_the_thumbnail() {
    let partners = partner_table();
    let client = owned_table::<Activity>(&partners);
    let row = client
        .insert(ActivityDraft {
            name: "Canyoning".into(),
            description: "Sauts et toboggans".into(),
            location: "Verdon".into(),
            images: vec!["a.png".into(), "b.png".into()],
            ..ActivityDraft::default()
        })
        .await
        .unwrap();

    let mut page = ResourcePage::new(client.clone(), Formatter::default());
    page.load().await;
    let patch = ActivityPatch {
        images: Some(Vec::new()),
        ..ActivityPatch::default()
    };
    let saved = page.update(row.id, patch).await.unwrap();

    assert!(saved.images.is_empty());
    assert_eq!(saved.image_url, None);
    assert_eq!(page.rows(), &[saved.clone()]);
    assert_eq!(client.get(row.id).await.unwrap(), Some(saved));
}

#[tokio::test]
async fn test_store_rejection_keeps_cache() {
    let partners = partner_table();
    let mut page = ResourcePage::new(owned_table::<Promotion>(&partners), Formatter::default());
    page.load().await;

    page.open_create();
    page.draft_mut().title = "Été".into();
    page.draft_mut().code = "SUMMER".into();
    page.submit().await.unwrap();
    let before = page.rows().to_vec();

    page.open_create();
    page.draft_mut().title = "Doublon".into();
    page.draft_mut().code = "summer".into();
    let result = page.submit().await;

    assert!(matches!(result, Err(MutationError::Remote(StoreError::Conflict { .. }))));
    assert_eq!(page.rows(), before.as_slice());
    assert_eq!(page.toasts().latest().map(|t| t.title.as_str()), Some("Erreur"));

    page.open_create();
    page.draft_mut().title = "Orphelin".into();
    page.draft_mut().code = "ORPHAN".into();
    page.draft_mut().partner_id = Some(Uuid::new_v4());
    assert!(matches!(page.submit().await, Err(MutationError::Remote(StoreError::Rejected(_)))));
    assert_eq!(page.rows(), before.as_slice());
}

// --- Delete ---

#[tokio::test]
async fn test_delete_travel_offer_while_offline() {
    let mut mock = MockTable::<TravelOffer>::new();
    mock.expect_select().return_ok(vec![travel_offer(5), travel_offer(3)]);
    mock.expect_delete(3).return_err(StoreError::Unavailable);

    let mut page = ResourcePage::new(mock.client(), Formatter::default());
    page.load().await;
    let before = page.rows().to_vec();

    page.request_delete(3);
    let result = page.confirm_delete().await;

    assert!(matches!(result, Err(MutationError::Remote(StoreError::Unavailable))));
    assert_eq!(page.rows(), before.as_slice());
    assert!(page.rows().iter().any(|offer| offer.id == 3));
    assert!(page.toasts().latest().is_some_and(|t| t.is_error()));
    assert_eq!(page.pending_delete(), None);
    mock.verify();
}

#[tokio::test]
async fn test_delete_needs_confirmation() {
    let (table, client) = TableActor::<TravelOffer>::new(16, sequential_ids(1));
    tokio::spawn(table.seed(vec![travel_offer(1), travel_offer(2)]).run(()));

    let mut page = ResourcePage::new(client.clone(), Formatter::default());
    page.load().await;

    assert!(matches!(page.confirm_delete().await, Err(MutationError::NothingToConfirm)));

    page.request_delete(1);
    page.cancel_delete();
    assert!(matches!(page.confirm_delete().await, Err(MutationError::NothingToConfirm)));
    assert_eq!(page.rows().len(), 2);

    page.request_delete(1);
    assert_eq!(page.pending_delete(), Some(&1));
    assert_eq!(page.confirm_delete().await.unwrap(), 1);

    assert!(page.store().get(&1).is_none());
    assert_eq!(client.get(1).await.unwrap(), None);
    assert_eq!(page.rows().len(), 1);
}

// --- Load ---

#[tokio::test]
async fn test_failed_load_shows_empty_state() {
    let mut mock = MockTable::<TravelOffer>::new();
    mock.expect_select().return_err(StoreError::Unavailable);
    mock.expect_select().return_ok(vec![travel_offer(1)]);

    let mut page = ResourcePage::new(mock.client(), Formatter::default());
    assert!(page.load().await.is_empty());
    assert_eq!(page.store().state(), LoadState::Failed);
    assert_eq!(page.view(), ListView::Empty);
    assert!(page.toasts().has_errors());

    // a failed read is retried on the next refresh, a loaded one is not
    assert_eq!(page.refresh().await.len(), 1);
    assert_eq!(page.refresh().await.len(), 1);
    assert_eq!(page.view().rows().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_partner_scope_filters_rows() {
    let partners = partner_table();
    let mine = partners
        .insert(PartnerDraft {
            name: "Mine".into(),
            ..PartnerDraft::default()
        })
        .await
        .unwrap();
    let theirs = partners
        .insert(PartnerDraft {
            name: "Theirs".into(),
            ..PartnerDraft::default()
        })
        .await
        .unwrap();

    let client = owned_table::<BonPlan>(&partners);
    for (title, owner) in [("A", Some(mine.id)), ("B", Some(theirs.id)), ("C", None)] {
        client
            .insert(BonPlanDraft {
                title: title.into(),
                description: "desc".into(),
                partner_id: owner,
                ..BonPlanDraft::default()
            })
            .await
            .unwrap();
    }

    let mut page =
        ResourcePage::new(client.clone(), Formatter::default()).with_scope(&AccessScope::partners([mine.id]));
    let titles: Vec<_> = page.load().await.iter().map(|b| b.title.clone()).collect();
    assert_eq!(titles, vec!["A"]);

    // a row created for another partner is saved but never listed here
    page.open_create();
    page.draft_mut().title = "D".into();
    page.draft_mut().description = "desc".into();
    page.draft_mut().partner_id = Some(theirs.id);
    let foreign = page.submit().await.unwrap();
    assert!(page.store().get(&foreign.id).is_none());
    assert_eq!(client.get(foreign.id).await.unwrap(), Some(foreign));

    page.open_create();
    page.draft_mut().title = "E".into();
    page.draft_mut().description = "desc".into();
    page.draft_mut().partner_id = Some(mine.id);
    page.submit().await.unwrap();
    let titles: Vec<_> = page.rows().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["E", "A"]);

    // handing a row over removes it from the list
    let a_id = page.rows()[1].id;
    let handover = BonPlanPatch {
        partner_id: Some(Some(theirs.id)),
        ..BonPlanPatch::default()
    };
    page.update(a_id, handover).await.unwrap();
    assert!(page.store().get(&a_id).is_none());

    let cached = page.rows().to_vec();
    page.load().await;
    assert_eq!(page.rows(), cached.as_slice());
}

// --- Images ---

#[tokio::test]
async fn test_uploads_fill_the_gallery() {
    let partners = partner_table();
    let (bucket, bucket_client) = BucketActor::new("images", "https://cdn.example.com/storage", 8);
    tokio::spawn(bucket.run());

    let mut page =
        ResourcePage::new(owned_table::<Activity>(&partners), Formatter::default()).with_bucket(bucket_client);
    page.load().await;
    page.open_create();

    let first = page.upload_image("front.JPG", vec![1, 2, 3]).await.unwrap();
    let second = page.upload_image("side.png", vec![4, 5]).await.unwrap();
    assert!(first.starts_with("https://cdn.example.com/storage/images/activities/"));
    assert!(first.ends_with(".jpg"));

    let draft = page.form().draft();
    assert_eq!(draft.images, vec![first.clone(), second.clone()]);
    assert_eq!(draft.image_url.as_ref(), Some(&first));

    gallery::set_primary(page.draft_mut(), 1);
    page.draft_mut().name = "Parapente".into();
    page.draft_mut().description = "Vol biplace".into();
    page.draft_mut().location = "Annecy".into();
    let saved = page.submit().await.unwrap();

    assert_eq!(saved.images, vec![second.clone(), first]);
    assert_eq!(saved.image_url, Some(second));
}

#[tokio::test]
async fn test_upload_without_image_field_or_bucket() {
    let (bucket, bucket_client) = BucketActor::new("images", "http://localhost", 8);
    tokio::spawn(bucket.run());
    let (table, client) = TableActor::<NewsletterSubscriber>::new(8, sequential_ids(1));
    tokio::spawn(table.run(()));

    let mut newsletter = ResourcePage::new(client.clone(), Formatter::default()).with_bucket(bucket_client);
    assert!(matches!(
        newsletter.upload_image("x.png", vec![1]).await,
        Err(MutationError::UploadUnavailable)
    ));

    let mut no_bucket = ResourcePage::new(client, Formatter::default());
    assert!(matches!(
        no_bucket.upload_image("x.png", vec![1]).await,
        Err(MutationError::UploadUnavailable)
    ));
    assert!(no_bucket.toasts().has_errors());
}
