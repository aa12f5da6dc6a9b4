//! Account route handlers.
//!
//! Every route here requires authentication, and every lookup is scoped to
//! the signed-in user's id. Record ids come from the path as strings; an id
//! that does not parse gets the same 404 as one that does not exist, so the
//! response shape never reveals whether an id was plausible.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use brasswood_core::{OrderId, ProformaId, ProformaStatus};

use crate::db::notifications::NotificationRepository;
use crate::db::orders::OrderRepository;
use crate::db::proformas::ProformaRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::auth::RequireAuth;
use crate::models::{Notification, Order, OrderItem, Proforma, ProformaItem};
use crate::state::AppState;

/// Date format used across account pages.
const DATE_FORMAT: &str = "%b %d, %Y";

// =============================================================================
// View Types
// =============================================================================

/// Order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub id: String,
    pub number: String,
    pub status: String,
    pub payment_status: String,
    pub total: String,
    pub placed_on: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            number: order.number.clone(),
            status: order.status.label().to_string(),
            payment_status: order.payment_status.label().to_string(),
            total: order.total.to_string(),
            placed_on: order.placed_at.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Order line-item display data.
#[derive(Clone)]
pub struct OrderItemView {
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: String,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            product_name: item.product_name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
        }
    }
}

/// Proforma display data for templates.
#[derive(Clone)]
pub struct ProformaView {
    pub id: String,
    pub number: String,
    pub status: String,
    pub total: String,
    pub issued_on: String,
}

impl From<&Proforma> for ProformaView {
    fn from(proforma: &Proforma) -> Self {
        Self {
            id: proforma.id.to_string(),
            number: proforma.number.clone(),
            status: proforma.status.label().to_string(),
            total: proforma.total.to_string(),
            issued_on: proforma.issued_at.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Proforma line-item display data.
#[derive(Clone)]
pub struct ProformaItemView {
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: String,
}

impl From<&ProformaItem> for ProformaItemView {
    fn from(item: &ProformaItem) -> Self {
        Self {
            product_name: item.product_name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
        }
    }
}

/// Notification display data.
#[derive(Clone)]
pub struct NotificationView {
    pub title: String,
    pub body: String,
    pub created_on: String,
    pub unread: bool,
}

impl From<&Notification> for NotificationView {
    fn from(notification: &Notification) -> Self {
        Self {
            title: notification.title.clone(),
            body: notification.body.clone(),
            created_on: notification.created_at.format(DATE_FORMAT).to_string(),
            unread: notification.is_unread(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Account overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountIndexTemplate {
    pub email: String,
    pub recent_orders: Vec<OrderView>,
    pub open_proformas: usize,
    pub unread_notifications: i64,
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/orders.html")]
pub struct OrdersTemplate {
    pub orders: Vec<OrderView>,
}

/// Order detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/order_detail.html")]
pub struct OrderDetailTemplate {
    pub order: OrderView,
    pub items: Vec<OrderItemView>,
}

/// Proforma list page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/proformas.html")]
pub struct ProformasTemplate {
    pub proformas: Vec<ProformaView>,
}

/// Proforma detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/proforma_detail.html")]
pub struct ProformaDetailTemplate {
    pub proforma: ProformaView,
    pub items: Vec<ProformaItemView>,
    pub notes: String,
    pub share_url: String,
}

/// Notification list page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/notifications.html")]
pub struct NotificationsTemplate {
    pub notifications: Vec<NotificationView>,
    pub unread: i64,
}

// =============================================================================
// Handlers
// =============================================================================

/// How many orders the overview shows.
const RECENT_ORDERS: usize = 5;

/// Display the account overview page.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.db()).list_for_user(user.id).await?;
    let proformas = ProformaRepository::new(state.db())
        .list_for_user(user.id)
        .await?;
    let unread_notifications = NotificationRepository::new(state.db())
        .unread_count_for_user(user.id)
        .await?;

    let open_proformas = proformas
        .iter()
        .filter(|p| matches!(p.status, ProformaStatus::Draft | ProformaStatus::Pending))
        .count();

    Ok(AccountIndexTemplate {
        email: user.email.to_string(),
        recent_orders: orders.iter().take(RECENT_ORDERS).map(OrderView::from).collect(),
        open_proformas,
        unread_notifications,
    })
}

/// Display the order history page.
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.db()).list_for_user(user.id).await?;

    Ok(OrdersTemplate {
        orders: orders.iter().map(OrderView::from).collect(),
    })
}

/// Display a single order with its line items.
pub async fn order_detail(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    // A malformed id is the same "not found" as a missing record
    let order_id = id
        .parse::<OrderId>()
        .map_err(|_| AppError::NotFound(format!("order {id}")))?;

    let repo = OrderRepository::new(state.db());
    let order = repo
        .get_for_user(user.id, order_id)
        .await?
        .into_option()
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let items = repo.items_for_order(&order).await?;

    Ok(OrderDetailTemplate {
        order: OrderView::from(&order),
        items: items.iter().map(OrderItemView::from).collect(),
    })
}

/// Display the proforma list page.
pub async fn proformas(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let proformas = ProformaRepository::new(state.db())
        .list_for_user(user.id)
        .await?;

    Ok(ProformasTemplate {
        proformas: proformas.iter().map(ProformaView::from).collect(),
    })
}

/// Display a single proforma with its items and share link.
pub async fn proforma_detail(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let proforma_id = id
        .parse::<ProformaId>()
        .map_err(|_| AppError::NotFound(format!("proforma {id}")))?;

    let repo = ProformaRepository::new(state.db());
    let proforma = repo
        .get_for_user(user.id, proforma_id)
        .await?
        .into_option()
        .ok_or_else(|| AppError::NotFound(format!("proforma {id}")))?;

    let items = repo.items_for_proforma(&proforma).await?;

    let share_url = format!(
        "{}/share/{}",
        state.config().base_url.trim_end_matches('/'),
        proforma.share_token
    );

    Ok(ProformaDetailTemplate {
        notes: proforma.notes.clone().unwrap_or_default(),
        proforma: ProformaView::from(&proforma),
        items: items.iter().map(ProformaItemView::from).collect(),
        share_url,
    })
}

/// Display the notification list page.
pub async fn notifications(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let repo = NotificationRepository::new(state.db());
    let notifications = repo.list_for_user(user.id).await?;
    let unread = repo.unread_count_for_user(user.id).await?;

    Ok(NotificationsTemplate {
        notifications: notifications.iter().map(NotificationView::from).collect(),
        unread,
    })
}
