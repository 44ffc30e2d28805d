//! Demo run of the back-office: one partner, a bon plan, a promotion toggled
//! off, an image upload, then every list printed the way the screens show it.

use backoffice::config::Config;
use backoffice::lifecycle::{setup_tracing, BackOffice};
use backoffice::model::{BonPlan, BonPlanDraft, Concert, ConcertDraft, Partner, PartnerDraft, Promotion, PromotionPatch};
use backoffice::ui::{Cell, ListView, Presentable, ResourcePage, FormModel};
use tracing::{error, info, Instrument};

fn print_page<T: FormModel + Presentable>(page: &ResourcePage<T>) {
    println!("== {} ==", T::TABLE);
    println!("{}", T::COLUMNS.join(" | "));
    match page.view() {
        ListView::Loading => println!("(chargement...)"),
        ListView::Empty => println!("(aucune donnée)"),
        ListView::Rows(rows) => {
            for row in rows {
                let cells: Vec<String> = row
                    .cells
                    .iter()
                    .map(|cell| match cell {
                        Cell::Text(text) => text.clone(),
                        Cell::Badge(badge) => format!("[{}]", badge.label),
                        Cell::Image(url) => format!("<{url}>"),
                        Cell::Placeholder => "<->".to_owned(),
                    })
                    .collect();
                println!("{}", cells.join(" | "));
            }
        }
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    setup_tracing(&config);

    info!("Starting back-office demo");
    let system = BackOffice::start(&config);

    // Partner
    let mut partners = system.page::<Partner>();
    partners.load().await;
    partners.open_create();
    *partners.draft_mut() = PartnerDraft {
        name: "Cap Soleil".to_owned(),
        category: "Bar de plage".to_owned(),
        contact_email: Some("contact@capsoleil.fr".to_owned()),
        ..Partner::blank_draft()
    };
    let partner = partners.submit().await?;
    info!(partner_id = %partner.id, "Partner created");

    // Bon plan owned by the partner
    let mut bons_plans = system.page::<BonPlan>();
    let span = tracing::info_span!("bon_plan_creation");
    async {
        bons_plans.load().await;
        bons_plans.open_create();
        *bons_plans.draft_mut() = BonPlanDraft {
            title: "Happy Hour".to_owned(),
            description: "2-for-1".to_owned(),
            discount: Some("2 pour 1".to_owned()),
            partner_id: Some(partner.id),
            ..BonPlan::blank_draft()
        };
        bons_plans.submit().await
    }
    .instrument(span)
    .await?;

    // Promotion, then toggled off from the list
    let mut promotions = system.page::<Promotion>();
    promotions.load().await;
    promotions.open_create();
    {
        let draft = promotions.draft_mut();
        draft.title = "Été".to_owned();
        draft.code = "summer26".to_owned();
        draft.partner_id = Some(partner.id);
    }
    let promo = promotions.submit().await?;
    promotions.update(promo.id, PromotionPatch::active(false)).await?;

    // Concert with an uploaded poster
    let mut concerts = system.page::<Concert>();
    concerts.load().await;
    concerts.open_create();
    *concerts.draft_mut() = ConcertDraft {
        title: "Nuit Électro".to_owned(),
        artist: "Nova".to_owned(),
        venue: "Zénith".to_owned(),
        location: "Paris".to_owned(),
        price: 45.0,
        ..Concert::blank_draft()
    };
    match concerts.upload_image("affiche.png", vec![0x89, 0x50, 0x4e, 0x47]).await {
        Ok(url) => info!(%url, "Poster uploaded"),
        Err(e) => error!(error = %e, "Poster upload failed"),
    }
    concerts.submit().await?;

    // An unconfirmed delete does nothing
    promotions.request_delete(promo.id);
    promotions.cancel_delete();

    print_page(&partners);
    print_page(&bons_plans);
    print_page(&promotions);
    print_page(&concerts);

    for page_toasts in [partners.toasts_mut().drain(), promotions.toasts_mut().drain()] {
        for toast in page_toasts {
            println!("{:?} {}: {}", toast.level, toast.title, toast.message);
        }
    }

    drop((partners, bons_plans, promotions, concerts));
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
