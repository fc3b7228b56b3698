use chrono::Utc;
use rand::{thread_rng, Rng};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::{allows, Action, Principal};
use crate::error::ApiError;
use crate::models::{Booking, BookingStatus, PaymentStatus};
use crate::store::Store;
use crate::types::CreateBookingRequest;

const VOUCHER_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const VOUCHER_LEN: usize = 8;
const VOUCHER_ATTEMPTS: usize = 5;

fn generate_voucher_code() -> String {
    let mut rng = thread_rng();
    (0..VOUCHER_LEN)
        .map(|_| VOUCHER_CHARSET[rng.gen_range(0..VOUCHER_CHARSET.len())] as char)
        .collect()
}

/// Booking lifecycle: pricing at creation, the status/payment state
/// machine, voucher issuance on confirmation, and per-role visibility.
#[derive(Clone)]
pub struct BookingEngine {
    store: Store,
}

impl BookingEngine {
    pub fn new(store: Store) -> Self {
        BookingEngine { store }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        req: CreateBookingRequest,
    ) -> Result<Booking, ApiError> {
        let room = self
            .store
            .rooms
            .get(req.room_id)
            .await?
            .ok_or(ApiError::NotFound("Room"))?;

        if req.check_in >= req.check_out {
            return Err(ApiError::invalid(
                "Check-out date must be after check-in date",
            ));
        }
        if req.guests < 1 {
            return Err(ApiError::invalid("Guest count must be at least 1"));
        }

        let nights = (req.check_out - req.check_in).num_days();
        let total_amount = room.base_rate * nights as f64;

        let booking = Booking {
            user_id: principal.user_id.clone(),
            property_id: req.property_id,
            room_id: req.room_id,
            check_in: req.check_in,
            check_out: req.check_out,
            guests: req.guests,
            total_amount,
            notes: req.notes,
            ..Default::default()
        };
        self.store.bookings.insert(&booking).await?;

        info!(
            booking_id = %booking.id,
            nights,
            total_amount,
            "booking created"
        );
        Ok(booking)
    }

    pub async fn confirm(&self, principal: &Principal, id: Uuid) -> Result<Booking, ApiError> {
        if !allows(principal.role, Action::ConfirmBooking) {
            return Err(ApiError::forbidden("Not authorized to confirm bookings"));
        }

        let mut booking = self
            .store
            .bookings
            .get(id)
            .await?
            .ok_or(ApiError::NotFound("Booking"))?;

        // A fresh code is issued on every confirm, deliberately; only
        // collisions with codes already stored are retried away.
        let mut voucher = generate_voucher_code();
        let mut attempts = 1;
        while self.store.bookings.voucher_exists(&voucher).await? {
            if attempts >= VOUCHER_ATTEMPTS {
                return Err(ApiError::Internal(anyhow::anyhow!(
                    "could not generate a unique voucher code"
                )));
            }
            debug!(attempts, "voucher code collision, regenerating");
            voucher = generate_voucher_code();
            attempts += 1;
        }

        booking.status = BookingStatus::Confirmed;
        booking.voucher_code = Some(voucher);
        booking.updated_at = Utc::now();
        self.store.bookings.update(&booking).await?;

        info!(booking_id = %booking.id, "booking confirmed");
        Ok(booking)
    }

    pub async fn pay(&self, principal: &Principal, id: Uuid) -> Result<Booking, ApiError> {
        let mut booking = self
            .store
            .bookings
            .get(id)
            .await?
            .ok_or(ApiError::NotFound("Booking"))?;

        if booking.user_id != principal.user_id {
            return Err(ApiError::forbidden("Not authorized to pay for this booking"));
        }
        if booking.status != BookingStatus::Confirmed {
            return Err(ApiError::invalid("Booking must be confirmed before payment"));
        }

        booking.payment_status = PaymentStatus::Paid;
        booking.payment_ref = Some(format!("pi_{}", Uuid::new_v4().simple()));
        booking.updated_at = Utc::now();
        self.store.bookings.update(&booking).await?;

        info!(booking_id = %booking.id, "booking paid");
        Ok(booking)
    }

    pub async fn cancel(&self, principal: &Principal, id: Uuid) -> Result<Booking, ApiError> {
        let mut booking = self
            .store
            .bookings
            .get(id)
            .await?
            .ok_or(ApiError::NotFound("Booking"))?;

        if !allows(principal.role, Action::AccessAnyBooking)
            && booking.user_id != principal.user_id
        {
            return Err(ApiError::forbidden("Not authorized to cancel this booking"));
        }

        // Cancellation is permitted from any state, including completed
        // and already-cancelled bookings.
        booking.status = BookingStatus::Cancelled;
        if booking.payment_status == PaymentStatus::Paid {
            booking.payment_status = PaymentStatus::Refunded;
        }
        booking.updated_at = Utc::now();
        self.store.bookings.update(&booking).await?;

        info!(booking_id = %booking.id, "booking cancelled");
        Ok(booking)
    }

    pub async fn list(&self, principal: &Principal) -> Result<Vec<Booking>, ApiError> {
        // property_sales sees the same set as admin: bookings carry no
        // owned-property scope to filter on.
        let bookings = if allows(principal.role, Action::AccessAnyBooking) {
            self.store.bookings.list().await?
        } else {
            self.store.bookings.list_for_user(&principal.user_id).await?
        };
        Ok(bookings)
    }

    pub async fn get(&self, principal: &Principal, id: Uuid) -> Result<Booking, ApiError> {
        let booking = self
            .store
            .bookings
            .get(id)
            .await?
            .ok_or(ApiError::NotFound("Booking"))?;

        if !allows(principal.role, Action::AccessAnyBooking)
            && booking.user_id != principal.user_id
        {
            return Err(ApiError::forbidden("Not authorized to view this booking"));
        }
        Ok(booking)
    }
}
