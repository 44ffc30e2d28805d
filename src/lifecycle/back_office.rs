use crate::config::Config;
use crate::model::{
    Activity, BonPlan, CarRental, Concert, Leisure, Medium, NewsletterSubscriber, Nightlife, Partner,
    PartnerDirectory, Promotion, TravelOffer,
};
use crate::resource::{AccessScope, Owned};
use crate::ui::{FormModel, Formatter, Presentable, ResourcePage};
use table_store::{sequential_ids, BucketActor, BucketClient, Record, TableActor, TableClient};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};
use uuid::Uuid;

/// Rows the tables start with. Numeric ids continue after the highest seeded id.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub partners: Vec<Partner>,
    pub activities: Vec<Activity>,
    pub bons_plans: Vec<BonPlan>,
    pub car_rentals: Vec<CarRental>,
    pub concerts: Vec<Concert>,
    pub leisures: Vec<Leisure>,
    pub newsletter: Vec<NewsletterSubscriber>,
    pub nightlife: Vec<Nightlife>,
    pub promotions: Vec<Promotion>,
    pub travel_offers: Vec<TravelOffer>,
    pub mediums: Vec<Medium>,
}

/// Starts and stops every table of the back-office.
///
/// `BackOffice` is responsible for:
/// - **Lifecycle Management**: one task per table plus the image bucket
/// - **Dependency Wiring**: the partner table starts first and its client is
///   injected into every partner-owned table
/// - **Views**: [`page`](Self::page) builds a [`ResourcePage`] for any table
///
/// # Example
///
/// ```no_run
/// use backoffice::config::Config;
/// use backoffice::lifecycle::BackOffice;
/// use backoffice::model::Promotion;
///
/// # async fn demo() -> Result<(), tokio::task::JoinError> {
/// let system = BackOffice::start(&Config::default());
/// let mut promotions = system.page::<Promotion>();
/// promotions.load().await;
/// drop(promotions);
/// system.shutdown().await
/// # }
/// ```
pub struct BackOffice {
    pub partners: PartnerDirectory,
    pub activities: TableClient<Activity>,
    pub bons_plans: TableClient<BonPlan>,
    pub car_rentals: TableClient<CarRental>,
    pub concerts: TableClient<Concert>,
    pub leisures: TableClient<Leisure>,
    pub newsletter: TableClient<NewsletterSubscriber>,
    pub nightlife: TableClient<Nightlife>,
    pub promotions: TableClient<Promotion>,
    pub travel_offers: TableClient<TravelOffer>,
    pub mediums: TableClient<Medium>,
    pub bucket: BucketClient,
    formatter: Formatter,
    handles: Vec<JoinHandle<()>>,
}

/// Spawns a table keyed by `u64`, seeded with `rows`.
fn spawn_numbered<T>(capacity: usize, rows: Vec<T>, context: T::Context, handles: &mut Vec<JoinHandle<()>>) -> TableClient<T>
where
    T: Record<Id = u64>,
{
    let start = rows.iter().map(|row| *row.id()).max().map_or(1, |max| max + 1);
    let (table, client) = TableActor::new(capacity, sequential_ids(start));
    handles.push(tokio::spawn(table.seed(rows).run(context)));
    client
}

impl BackOffice {
    /// Starts every table empty. Must be called inside a Tokio runtime.
    pub fn start(config: &Config) -> Self {
        Self::start_seeded(config, Seed::default())
    }

    pub fn start_seeded(config: &Config, seed: Seed) -> Self {
        let capacity = config.channel_capacity;
        let mut handles = Vec::new();

        // 1. Partners first: every owned table checks references against it
        let (partner_table, partners) = TableActor::<Partner>::new(capacity, Uuid::new_v4);
        handles.push(tokio::spawn(partner_table.seed(seed.partners).run(())));

        // 2. Partner-owned tables get the directory as context
        let activities = spawn_numbered(capacity, seed.activities, partners.clone(), &mut handles);
        let bons_plans = spawn_numbered(capacity, seed.bons_plans, partners.clone(), &mut handles);
        let car_rentals = spawn_numbered(capacity, seed.car_rentals, partners.clone(), &mut handles);
        let leisures = spawn_numbered(capacity, seed.leisures, partners.clone(), &mut handles);
        let nightlife = spawn_numbered(capacity, seed.nightlife, partners.clone(), &mut handles);
        let promotions = spawn_numbered(capacity, seed.promotions, partners.clone(), &mut handles);

        // 3. Independent tables
        let concerts = spawn_numbered(capacity, seed.concerts, (), &mut handles);
        let newsletter = spawn_numbered(capacity, seed.newsletter, (), &mut handles);
        let travel_offers = spawn_numbered(capacity, seed.travel_offers, (), &mut handles);
        let mediums = spawn_numbered(capacity, seed.mediums, (), &mut handles);

        // 4. Image storage
        let (bucket_actor, bucket) = BucketActor::new(&config.bucket, &config.storage_url, capacity);
        handles.push(tokio::spawn(bucket_actor.run()));

        info!(tables = handles.len() - 1, bucket = %config.bucket, "Back-office started");

        Self {
            partners,
            activities,
            bons_plans,
            car_rentals,
            concerts,
            leisures,
            newsletter,
            nightlife,
            promotions,
            travel_offers,
            mediums,
            bucket,
            formatter: Formatter::from_config(config),
            handles,
        }
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// A fresh view on table `T`, with image uploads enabled.
    pub fn page<T>(&self) -> ResourcePage<T>
    where
        T: FormModel + Presentable,
        Self: HasTable<T>,
    {
        ResourcePage::new(self.table().clone(), self.formatter.clone()).with_bucket(self.bucket.clone())
    }

    /// A view restricted to the rows `scope` may see.
    pub fn scoped_page<T>(&self, scope: &AccessScope) -> ResourcePage<T>
    where
        T: FormModel + Presentable + Owned,
        Self: HasTable<T>,
    {
        self.page::<T>().with_scope(scope)
    }

    /// Gracefully shuts down every table.
    ///
    /// Dropping the clients held here closes the mailboxes; each table then drains
    /// and exits. Pages built by [`page`](Self::page) hold clients too and must be
    /// dropped first, or this waits for them.
    pub async fn shutdown(mut self) -> Result<(), JoinError> {
        info!("Shutting down back-office...");
        let handles = std::mem::take(&mut self.handles);
        drop(self);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Table task failed");
                return Err(e);
            }
        }

        info!("Back-office shutdown complete.");
        Ok(())
    }
}

/// Lookup of a table client by row type, so views can be built generically.
pub trait HasTable<T: Record> {
    fn table(&self) -> &TableClient<T>;
}

macro_rules! has_table {
    ($($ty:ty => $field:ident),+ $(,)?) => {
        $(
            impl HasTable<$ty> for BackOffice {
                fn table(&self) -> &TableClient<$ty> {
                    &self.$field
                }
            }
        )+
    };
}

has_table! {
    Partner => partners,
    Activity => activities,
    BonPlan => bons_plans,
    CarRental => car_rentals,
    Concert => concerts,
    Leisure => leisures,
    NewsletterSubscriber => newsletter,
    Nightlife => nightlife,
    Promotion => promotions,
    TravelOffer => travel_offers,
    Medium => mediums,
}
