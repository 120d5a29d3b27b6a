//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use linkhub_core::config::AppConfig;
use linkhub_core::result::AppResult;
use linkhub_database::DatabasePool;
use linkhub_database::repositories::{
    AppointmentRepository, CardRepository, FormRepository, InvitationRepository, LinkRepository,
};
use linkhub_service::{
    AppointmentService, AuthService, CardService, FormService, InvitationService, KeyGenerator,
    LinkCore, LinkIssuer, LinkResolver, LinkService, LinkTypeRegistry, PublicDispatcher,
    RsvpService, SecureKeyGenerator, SummaryService, UserAdminService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    pub db: DatabasePool,

    // ── Links ────────────────────────────────────────────────
    /// Public `GET /{key}` dispatch.
    pub dispatcher: Arc<PublicDispatcher>,
    /// Link lookups and the key immutability guard.
    pub links: Arc<LinkService<LinkRepository>>,

    // ── Resources ────────────────────────────────────────────
    pub invitations: Arc<InvitationService>,
    pub appointments: Arc<AppointmentService>,
    pub forms: Arc<FormService>,
    pub cards: Arc<CardService>,
    pub rsvps: Arc<RsvpService>,
    pub summary: Arc<SummaryService>,

    // ── Accounts ─────────────────────────────────────────────
    pub auth: Arc<AuthService>,
    pub users: Arc<UserAdminService>,
}

impl AppState {
    /// Wire every service on top of an open pool.
    ///
    /// Loads the link type ids once; fails if the lookup table is not seeded.
    pub async fn new(config: AppConfig, db: DatabasePool) -> AppResult<Self> {
        let registry = Arc::new(LinkTypeRegistry::load(&db).await?);
        let generator: Arc<dyn KeyGenerator> = Arc::new(SecureKeyGenerator::new());

        let resolver = Arc::new(LinkResolver::new(LinkRepository::new(), config.links.clone()));
        let core = LinkCore {
            issuer: Arc::new(LinkIssuer::new(
                LinkRepository::new(),
                generator,
                &config.links,
            )),
            resolver: Arc::clone(&resolver),
            registry,
        };

        let invitations = Arc::new(InvitationService::new(
            db.clone(),
            InvitationRepository::new(),
            core.clone(),
        ));
        let appointments = Arc::new(AppointmentService::new(
            db.clone(),
            AppointmentRepository::new(),
            core.clone(),
        ));
        let forms = Arc::new(FormService::new(db.clone(), FormRepository::new(), core.clone()));
        let cards = Arc::new(CardService::new(db.clone(), CardRepository::new(), core));

        let dispatcher = Arc::new(PublicDispatcher::new(
            db.clone(),
            resolver,
            Arc::clone(&invitations),
            Arc::clone(&appointments),
            Arc::clone(&forms),
            Arc::clone(&cards),
        ));
        let rsvps = Arc::new(RsvpService::new(db.clone(), Arc::clone(&invitations)));

        let auth = Arc::new(AuthService::new(db.clone(), &config.auth));
        let users = Arc::new(UserAdminService::new(db.clone(), &config.auth));
        let summary = Arc::new(SummaryService::new(
            Arc::clone(&invitations),
            Arc::clone(&appointments),
            Arc::clone(&forms),
            Arc::clone(&cards),
            Arc::clone(&users),
        ));

        Ok(Self {
            config: Arc::new(config),
            db,
            dispatcher,
            links: Arc::new(LinkService::new(LinkRepository::new())),
            invitations,
            appointments,
            forms,
            cards,
            rsvps,
            summary,
            auth,
            users,
        })
    }
}
