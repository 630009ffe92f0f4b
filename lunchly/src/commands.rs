//! Command execution for the `lunchly` binary.
//!
//! Each command borrows one pooled connection, runs a single repository operation (two for
//! `customers show` and `customers edit`), and returns the result as JSON for printing.

use crate::config::{Command, CustomerCommand, ReservationCommand};
use crate::db::handlers::{
    Customers, Repository, Reservations,
    customers::CustomerFilter,
    reservations::ReservationFilter,
};
use crate::db::models::{customers::Customer, reservations::Reservation};
use crate::errors::{Error, Result};
use chrono::NaiveDateTime;
use serde_json::{Value, json};
use sqlx::PgPool;
use tracing::{info, instrument};

const START_AT_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a local start time such as "2024-05-01 19:30".
pub fn parse_start_at(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    START_AT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| Error::BadRequest {
            message: format!("Invalid start time '{input}': expected YYYY-MM-DD HH:MM"),
        })
}

#[instrument(skip(pool), err)]
pub async fn run(pool: &PgPool, command: Command) -> Result<Value> {
    match command {
        Command::Migrate => {
            crate::migrator().run(pool).await.map_err(anyhow::Error::from)?;
            info!("Migrations applied");
            Ok(json!({ "migrated": true }))
        }
        Command::Customers(command) => run_customer_command(pool, command).await,
        Command::Reservations(command) => run_reservation_command(pool, command).await,
    }
}

async fn run_customer_command(pool: &PgPool, command: CustomerCommand) -> Result<Value> {
    let mut conn = pool.acquire().await.map_err(crate::db::errors::DbError::from)?;
    let mut repo = Customers::new(&mut conn);

    let value = match command {
        CustomerCommand::List { skip, limit } => {
            let customers = repo.list(&CustomerFilter { skip, limit }).await?;
            to_json(&customers)?
        }
        CustomerCommand::Show { id } => {
            let customer = repo.get(id).await?;
            let reservations = repo.get_reservations(id).await?;
            json!({
                "full_name": customer.full_name(),
                "customer": customer,
                "reservations": reservations,
            })
        }
        CustomerCommand::Search { name } => to_json(&repo.search(&name).await?)?,
        CustomerCommand::Top { limit } => to_json(&repo.top(limit).await?)?,
        CustomerCommand::Add {
            first_name,
            last_name,
            phone,
            notes,
        } => {
            let mut customer = Customer::new(first_name, last_name, phone, notes);
            repo.save(&mut customer).await?;
            to_json(&customer)?
        }
        CustomerCommand::Edit {
            id,
            first_name,
            last_name,
            phone,
            clear_phone,
            notes,
        } => {
            let mut customer = Customer::from(repo.get(id).await?);
            if let Some(first_name) = first_name {
                customer.first_name = first_name;
            }
            if let Some(last_name) = last_name {
                customer.last_name = last_name;
            }
            if clear_phone {
                customer.phone = None;
            } else if phone.is_some() {
                customer.phone = phone;
            }
            if let Some(notes) = notes {
                customer.notes = notes;
            }
            repo.save(&mut customer).await?;
            to_json(&customer)?
        }
    };

    Ok(value)
}

async fn run_reservation_command(pool: &PgPool, command: ReservationCommand) -> Result<Value> {
    let mut conn = pool.acquire().await.map_err(crate::db::errors::DbError::from)?;
    let mut repo = Reservations::new(&mut conn);

    let value = match command {
        ReservationCommand::List { customer } => {
            let filter = match customer {
                Some(customer_id) => ReservationFilter::all().for_customer(customer_id),
                None => ReservationFilter::all(),
            };
            to_json(&repo.list(&filter).await?)?
        }
        ReservationCommand::Show { id } => to_json(&repo.get(id).await?)?,
        ReservationCommand::Add {
            customer,
            start_at,
            num_guests,
            notes,
        } => {
            let mut reservation = Reservation::new(customer, parse_start_at(&start_at)?, num_guests, notes)?;
            repo.save(&mut reservation).await?;
            to_json(&reservation)?
        }
    };

    Ok(value)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::Other(e.into()))
}
