use super::ui;
use crate::core::currency::find_currency;
use crate::core::kv::KeyValueStore;
use crate::core::model::{ProfileUpdate, UserProfile};
use crate::core::validate::{validate_contact, validate_email};
use crate::service::StorageService;
use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use comfy_table::Cell;

#[derive(Debug, Clone, Subcommand)]
pub enum ProfileCommand {
    /// Show the stored profile
    Show,
    /// Create or update the profile; omitted fields are kept
    Set(ProfileArgs),
    /// Delete the profile
    Delete {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Phone number with at least ten digits
    #[arg(long)]
    pub contact: Option<String>,
    /// Preferred currency code, e.g. EUR
    #[arg(long)]
    pub currency: Option<String>,
    /// Path or URL of an avatar image
    #[arg(long)]
    pub avatar: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Validates the form fields. Blank email and contact are allowed, a blank
/// name is not.
fn to_update(args: ProfileArgs) -> Result<ProfileUpdate> {
    let name = trimmed(args.name);
    if name.as_deref().is_some_and(str::is_empty) {
        bail!("Name cannot be empty");
    }

    let email = trimmed(args.email);
    if let Some(email) = email.as_deref().filter(|e| !e.is_empty()) {
        if !validate_email(email) {
            bail!("Invalid email address '{email}'");
        }
    }

    let contact = trimmed(args.contact);
    if let Some(contact) = contact.as_deref().filter(|c| !c.is_empty()) {
        if !validate_contact(contact) {
            bail!("Invalid contact number '{contact}'");
        }
    }

    let currency = trimmed(args.currency).map(|c| c.to_uppercase());
    if let Some(code) = currency.as_deref() {
        if find_currency(code).is_none() {
            bail!("Unsupported currency '{code}'");
        }
    }

    Ok(ProfileUpdate {
        name,
        email,
        contact,
        avatar: trimmed(args.avatar).filter(|a| !a.is_empty()),
        currency,
    })
}

pub async fn set<S: KeyValueStore + ?Sized>(
    service: &StorageService<S>,
    args: ProfileArgs,
) -> Result<UserProfile> {
    let update = to_update(args)?;
    match service.save_user_profile(update).await {
        Some(profile) => Ok(profile),
        None => bail!("Failed to save profile"),
    }
}

pub async fn delete<S: KeyValueStore + ?Sized>(
    service: &StorageService<S>,
    assume_yes: bool,
) -> Result<bool> {
    if !assume_yes && !ui::confirm("Delete your profile?")? {
        return Ok(false);
    }
    if !service.delete_user_profile().await {
        bail!("Failed to delete profile");
    }
    Ok(true)
}

pub fn display_profile(profile: Option<&UserProfile>) -> String {
    let Some(profile) = profile else {
        return ui::style_text(
            "No profile yet. Create one with `profile set`.",
            ui::StyleType::Subtle,
        );
    };

    let currency = find_currency(&profile.currency)
        .map_or_else(|| profile.currency.clone(), |c| format!("{} ({})", c.code, c.name));
    let timestamp = |ts: Option<chrono::DateTime<chrono::Utc>>| {
        ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);
    table.add_row(vec![Cell::new("Initials"), Cell::new(profile.initials())]);
    table.add_row(vec![Cell::new("Name"), ui::optional_cell(Some(profile.name.as_str()))]);
    table.add_row(vec![Cell::new("Email"), ui::optional_cell(Some(profile.email.as_str()))]);
    table.add_row(vec![Cell::new("Contact"), ui::optional_cell(Some(profile.contact.as_str()))]);
    table.add_row(vec![Cell::new("Avatar"), ui::optional_cell(profile.avatar.as_deref())]);
    table.add_row(vec![Cell::new("Currency"), Cell::new(currency)]);
    table.add_row(vec![
        Cell::new("Created"),
        ui::optional_cell(timestamp(profile.created_at).as_deref()),
    ]);
    table.add_row(vec![
        Cell::new("Updated"),
        ui::optional_cell(timestamp(profile.updated_at).as_deref()),
    ]);
    table.to_string()
}
