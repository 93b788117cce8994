//! Editing the budget form.
//!
//! # Usage
//!
//! ```bash
//! # Start a broiler budget in Kenyan shillings
//! river-poultry init --bird-type broiler --currency KES
//!
//! # Basic information
//! river-poultry set birds 500
//! river-poultry set period 42
//! river-poultry set chick-cost 95
//! river-poultry set meat-price 550
//!
//! # Feed
//! river-poultry feed-mode complete
//! river-poultry set-stage starter 200 78
//! river-poultry add-ingredient "Fish meal" 50 120
//!
//! # Health
//! river-poultry recommend-vaccines
//! river-poultry set-cost 3f2a... 12000
//! river-poultry add-drug "Coccidiostat" 10 1500 --notes "in water"
//! river-poultry remove 3f2a...
//! ```

use clap::ValueEnum;
use river_poultry_core::{
    BirdType, BudgetForm, CurrencyCode, FeedMode, FeedStage, HealthKind, STORAGE_KEY,
};
use river_poultry_planner::PlannerError;
use rust_decimal::Decimal;

use super::{Context, say};

/// Form fields settable with `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormField {
    /// Bird type (layer, broiler, dual-purpose-fast, dual-purpose-slow)
    BirdType,
    /// Number of birds
    Birds,
    /// Production period, in days for broilers and weeks otherwise
    Period,
    /// Price of one day-old chick
    ChickCost,
    /// Price per tray of 30 eggs
    EggPrice,
    /// Sale price per bird
    MeatPrice,
    /// Currency code, e.g. UGX
    Currency,
    /// Monthly labour cost
    Labour,
    /// Monthly water cost
    Water,
    /// Monthly biosecurity cost
    Biosecurity,
    /// One-off brooding cost
    Brooding,
    Phone,
    Email,
    /// Calling code, e.g. +256
    CountryCode,
}

/// Feed sourcing, as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeedModeArg {
    /// Mix on farm from raw ingredients
    Ingredients,
    /// Buy ready-made stage feeds
    Complete,
}

impl From<FeedModeArg> for FeedMode {
    fn from(arg: FeedModeArg) -> Self {
        match arg {
            FeedModeArg::Ingredients => Self::Ingredients,
            FeedModeArg::Complete => Self::Complete,
        }
    }
}

/// Start a new budget, replacing any saved one when `force` is set.
pub fn init(
    ctx: &Context,
    bird_type: Option<BirdType>,
    currency: Option<CurrencyCode>,
    force: bool,
) -> Result<(), PlannerError> {
    if ctx.store.get_raw(STORAGE_KEY)?.is_some() && !force {
        say("A budget is already saved. Use --force to start over.");
        return Ok(());
    }
    let mut session = ctx.session()?;
    session.reset();
    if let Some(bird) = bird_type {
        session.form.set_bird_type(bird);
    }
    if let Some(currency) = currency {
        session.form.currency_code = currency;
    }
    session.save()?;
    say(format!(
        "Started a {} budget in {}.",
        session.form.bird_type,
        session.form.currency_code
    ));
    Ok(())
}

/// Print every field of the saved form.
pub fn show(ctx: &Context) -> Result<(), PlannerError> {
    let session = ctx.session()?;
    let form = &session.form;
    let unit = form.bird_type.age_unit();

    say(format!("Step: {}", session.wizard.step().title()));
    say(format!("Bird type: {} ({})", form.bird_type, form.bird_type.as_str()));
    say(format!("Birds: {}", blank(&form.num_birds)));
    say(format!("Production period ({unit}): {}", blank(&form.production_period)));
    say(format!("  {}", form.bird_type.period_hint()));
    say(format!("Day-old chick cost: {}", blank(&form.doc_cost_per_chick)));
    if form.bird_type.is_egg_layer() {
        say(format!("Egg price per tray: {}", blank(&form.egg_price)));
    } else {
        say(format!("Sale price per bird: {}", blank(&form.broiler_price)));
    }
    say(format!(
        "Currency: {} ({})",
        form.currency_code,
        form.currency_code.name()
    ));

    match form.feed_type {
        FeedMode::Ingredients => {
            say("Feed: ingredients (kg per ton @ price per kg)");
            for item in &form.feed_items {
                say(format!(
                    "  [{}] {}: {} @ {}",
                    item.id, item.name, item.kg_per_ton, item.price_per_kg
                ));
            }
        }
        FeedMode::Complete => {
            say("Feed: complete stages (kg per ton @ price per kg)");
            for item in &form.complete_feed_items {
                say(format!(
                    "  {}: {} @ {}",
                    item.stage.label(),
                    item.kg_per_ton,
                    item.price_per_kg
                ));
            }
        }
    }

    for (title, entries) in [
        ("Vaccinations", &form.vaccinations),
        ("Drug treatments", &form.drug_treatments),
    ] {
        say(format!("{title} (age in {unit}):"));
        for entry in entries {
            say(format!(
                "  [{}] {} at {}: {}{}",
                entry.id,
                entry.name,
                entry.age,
                entry.cost,
                if entry.notes.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", entry.notes)
                }
            ));
        }
    }

    say(format!("Labour per month: {}", blank(&form.labour_cost)));
    say(format!("Water per month: {}", blank(&form.water_cost)));
    say(format!("Biosecurity per month: {}", blank(&form.biosecurity_cost)));
    say(format!("Brooding (one-off): {}", blank(&form.brooding_cost)));
    say(format!(
        "Contact: {}",
        form.contact_info.footer_line().trim_start_matches("Contact: ")
    ));
    Ok(())
}

/// Set one field.
pub fn set(ctx: &Context, field: FormField, value: &str) -> Result<(), PlannerError> {
    let mut session = ctx.session()?;
    apply(&mut session.form, field, value)?;
    session.save()?;
    say(format!("{} = {}", field_name(field), value.trim()));
    Ok(())
}

/// Apply a `set` to the form.
///
/// Numbers are stored as typed and coerced when the budget is calculated;
/// only the enumerated fields are validated here.
pub fn apply(form: &mut BudgetForm, field: FormField, value: &str) -> Result<(), PlannerError> {
    let text = value.trim().to_string();
    match field {
        FormField::BirdType => {
            let bird = text
                .parse::<BirdType>()
                .map_err(|e| PlannerError::invalid("bird type", e))?;
            form.set_bird_type(bird);
        }
        FormField::Currency => {
            form.currency_code = text
                .parse::<CurrencyCode>()
                .map_err(|e| PlannerError::invalid("currency", e))?;
        }
        FormField::Email => {
            if !text.is_empty() {
                river_poultry_core::Email::parse(&text)
                    .map_err(|e| PlannerError::invalid("email", e))?;
            }
            form.contact_info.email = text;
        }
        FormField::Birds => form.num_birds = text,
        FormField::Period => form.production_period = text,
        FormField::ChickCost => form.doc_cost_per_chick = text,
        FormField::EggPrice => form.egg_price = text,
        FormField::MeatPrice => form.broiler_price = text,
        FormField::Labour => form.labour_cost = text,
        FormField::Water => form.water_cost = text,
        FormField::Biosecurity => form.biosecurity_cost = text,
        FormField::Brooding => form.brooding_cost = text,
        FormField::Phone => form.contact_info.phone = text,
        FormField::CountryCode => form.contact_info.country_code = text,
    }
    Ok(())
}

fn field_name(field: FormField) -> String {
    field
        .to_possible_value()
        .map_or_else(String::new, |v| v.get_name().to_string())
}

/// Switch feed mode; the new mode's list is reseeded with suggestions.
pub fn feed_mode(ctx: &Context, mode: FeedModeArg) -> Result<(), PlannerError> {
    let mut session = ctx.session()?;
    session.form.set_feed_mode(mode.into());
    session.save()?;
    say(format!("Feed mode set to {}.", mode_name(mode)));
    Ok(())
}

const fn mode_name(mode: FeedModeArg) -> &'static str {
    match mode {
        FeedModeArg::Ingredients => "ingredients",
        FeedModeArg::Complete => "complete",
    }
}

pub fn add_ingredient(
    ctx: &Context,
    name: &str,
    kg_per_ton: Decimal,
    price_per_kg: Decimal,
) -> Result<(), PlannerError> {
    if name.trim().is_empty() {
        return Err(PlannerError::invalid("ingredient", "name is empty"));
    }
    let mut session = ctx.session()?;
    let id = session.form.add_ingredient(name, kg_per_ton, price_per_kg);
    session.save()?;
    say(format!("Added ingredient {} [{id}].", name.trim()));
    Ok(())
}

pub fn set_stage(
    ctx: &Context,
    stage: FeedStage,
    kg_per_ton: Decimal,
    price_per_kg: Decimal,
) -> Result<(), PlannerError> {
    let mut session = ctx.session()?;
    session.form.set_stage(stage, kg_per_ton, price_per_kg);
    session.save()?;
    say(format!(
        "{}: {kg_per_ton} kg per ton @ {price_per_kg} per kg.",
        stage.label()
    ));
    Ok(())
}

pub fn add_health(
    ctx: &Context,
    kind: HealthKind,
    name: &str,
    age: Decimal,
    cost: Decimal,
    notes: &str,
) -> Result<(), PlannerError> {
    if name.trim().is_empty() {
        return Err(PlannerError::invalid("name", "name is empty"));
    }
    let mut session = ctx.session()?;
    let id = session.form.add_health_entry(kind, name, age, cost, notes);
    session.save()?;
    let what = match kind {
        HealthKind::Vaccination => "vaccination",
        HealthKind::Drug => "drug treatment",
    };
    say(format!("Added {what} {} [{id}].", name.trim()));
    Ok(())
}

/// Append the recommended vaccination programme for the bird type.
pub fn recommend_vaccines(ctx: &Context) -> Result<(), PlannerError> {
    let mut session = ctx.session()?;
    let added = session.form.add_recommended_vaccines();
    session.save()?;
    say(format!(
        "Added {added} recommended vaccinations for {}. Price them with `set-cost`.",
        session.form.bird_type
    ));
    Ok(())
}

/// Set the cost of a vaccination or drug treatment.
pub fn set_cost(ctx: &Context, id: &str, cost: Decimal) -> Result<(), PlannerError> {
    let mut session = ctx.session()?;
    if !session.form.set_health_cost(id.trim(), cost) {
        return Err(PlannerError::UnknownEntry(id.trim().to_string()));
    }
    session.save()?;
    say(format!("Cost of {} set to {cost}.", id.trim()));
    Ok(())
}

/// Remove an ingredient, vaccination or drug treatment by id.
pub fn remove(ctx: &Context, id: &str) -> Result<(), PlannerError> {
    let mut session = ctx.session()?;
    if !session.form.remove(id.trim()) {
        return Err(PlannerError::UnknownEntry(id.trim().to_string()));
    }
    session.save()?;
    say(format!("Removed {}.", id.trim()));
    Ok(())
}

/// Clear the form and return to the first step.
pub fn reset(ctx: &Context) -> Result<(), PlannerError> {
    let mut session = ctx.session()?;
    session.reset();
    session.save()?;
    say("Budget reset.");
    Ok(())
}

fn blank(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_text_fields_keep_raw_input() {
        let mut form = BudgetForm::new();
        apply(&mut form, FormField::Birds, " 1,000 ").unwrap();
        assert_eq!(form.num_birds, "1,000");
        apply(&mut form, FormField::MeatPrice, "abc").unwrap();
        assert_eq!(form.broiler_price, "abc");
        assert_eq!(form.parameters().meat_price, Decimal::ZERO);
    }

    #[test]
    fn test_apply_bird_type_reseeds_feed() {
        let mut form = BudgetForm::new();
        apply(&mut form, FormField::BirdType, "sasso/kroilers").unwrap();
        assert_eq!(form.bird_type, BirdType::DualPurposeFast);
        assert!(apply(&mut form, FormField::BirdType, "turkey").is_err());
    }

    #[test]
    fn test_apply_validates_currency_and_email() {
        let mut form = BudgetForm::new();
        apply(&mut form, FormField::Currency, "kes").unwrap();
        assert_eq!(form.currency_code, CurrencyCode::KES);
        assert!(apply(&mut form, FormField::Currency, "XYZ").is_err());

        assert!(apply(&mut form, FormField::Email, "nobody").is_err());
        apply(&mut form, FormField::Email, "farmer@example.com").unwrap();
        apply(&mut form, FormField::Email, "").unwrap();
        assert!(form.contact_info.email.is_empty());
    }

    #[test]
    fn test_field_names_are_kebab_case() {
        assert_eq!(field_name(FormField::ChickCost), "chick-cost");
        assert_eq!(field_name(FormField::CountryCode), "country-code");
    }
}
