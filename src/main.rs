use chrono::{Local, Months, NaiveDate, Utc};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use supply_tracker_rs::calculation::{
    calculate_category, generate_dashboard_alerts, CalculationInputs, CalculationOptions,
    CategoryReport, DashboardContext, EnglishTranslator,
};
use supply_tracker_rs::cli::{
    AddItem, CategoryAction, Cli, Command, HouseholdAction, KitAction, ToggleAction,
};
use supply_tracker_rs::error::{Result, SupplyError};
use supply_tracker_rs::interface::{
    display_alerts, display_categories, display_category_report, display_category_summary,
    display_household, display_import_summary, display_inventory, display_kits,
    prompt_household, resolve_recommended_item, shopping_list_rows, write_shopping_list,
};
use supply_tracker_rs::models::{
    Category, HouseholdConfig, HouseholdConfigFactory, HouseholdConfigInput, Kit,
    RecommendedItemDefinition, Unit, CUSTOM_ITEM_TYPE,
};
use supply_tracker_rs::state::{
    export_backup, import_backup, read_backup, write_backup, AppData, BackupSection, FileStore,
    ItemUpdate, NewInventoryItem,
};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loaded state plus the per-run settings.
struct Session {
    store: FileStore,
    data: AppData,
    options: CalculationOptions,
    today: NaiveDate,
}

impl Session {
    fn open(cli: &Cli) -> Result<Self> {
        let store = FileStore::new(&cli.file);
        let data = AppData::load(&store)?;
        let options = cli.options.apply(data.settings.clone())?;
        let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
        Ok(Self {
            store,
            data,
            options,
            today,
        })
    }

    fn save(&mut self) -> Result<()> {
        self.data.save(&mut self.store)?;
        info!(path = %self.store.path().display(), "saved state");
        Ok(())
    }

    fn inputs<'a>(&'a self, recommended: &'a [RecommendedItemDefinition]) -> CalculationInputs<'a> {
        self.data.calculation_inputs(recommended, &self.options)
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut session = Session::open(&cli)?;
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Status => cmd_status(&session),
        Command::Household { action } => {
            cmd_household(&mut session, action.unwrap_or(HouseholdAction::Show))
        }
        Command::Settings { save } => cmd_settings(&mut session, save),
        Command::Add(args) => cmd_add(&mut session, args),
        Command::Update {
            id,
            name,
            quantity,
            expires,
            never_expires,
            location,
            notes,
        } => {
            let update = ItemUpdate {
                name,
                quantity,
                expiration_date: expires,
                never_expires,
                location,
                notes,
            };
            session.data.inventory.update_item(&id, update)?;
            session.save()?;
            println!("Updated {}.", id);
            Ok(())
        }
        Command::Remove { id } => {
            let removed = session.data.inventory.remove_item(&id)?;
            session.save()?;
            println!("Removed {} ({}).", removed.name, removed.id);
            Ok(())
        }
        Command::MarkEnough { id, unset } => {
            session.data.inventory.set_marked_as_enough(&id, !unset)?;
            session.save()?;
            if unset {
                println!("{} is no longer marked as enough.", id);
            } else {
                println!("{} marked as enough.", id);
            }
            Ok(())
        }
        Command::List { category } => {
            let items: Vec<_> = session
                .data
                .inventory
                .items()
                .iter()
                .filter(|item| category.as_deref().is_none_or(|c| item.category_id == c))
                .collect();
            display_inventory(&items, session.today);
            Ok(())
        }
        Command::Shortages { category } => cmd_shortages(&session, category.as_deref()),
        Command::Recommendation { action } => {
            let (id, enabled) = match action {
                ToggleAction::Disable { id } => (id, false),
                ToggleAction::Enable { id } => (id, true),
            };
            session.data.set_recommendation_enabled(&id, enabled)?;
            session.save()?;
            println!("{} {}.", id, if enabled { "enabled" } else { "disabled" });
            Ok(())
        }
        Command::Category { action } => cmd_category(&mut session, action),
        Command::Kit { action } => cmd_kit(&mut session, action),
        Command::Export { path, sections } => {
            let sections = sections_or_all(sections);
            let backup = export_backup(&session.data, &sections, Utc::now());
            write_backup(&path, &backup)?;
            session.data.last_backup_date = Some(session.today);
            session.save()?;
            println!("Exported {} section(s) to {}.", sections.len(), path.display());
            Ok(())
        }
        Command::Import { path, sections } => {
            let backup = read_backup(&path)?;
            let summary = import_backup(&mut session.data, backup, &sections_or_all(sections))?;
            session.save()?;
            display_import_summary(&summary);
            Ok(())
        }
        Command::ShoppingList { path } => {
            let categories = session.data.categories();
            let recommended = session.data.recommended_items();
            let inputs = session.inputs(&recommended);
            let reports: Vec<CategoryReport> = categories
                .iter()
                .map(|c| calculate_category(&c.id, &inputs))
                .collect();
            let rows = shopping_list_rows(&reports);
            write_shopping_list(&path, &rows)?;
            println!("Wrote {} item(s) to {}.", rows.len(), path.display());
            Ok(())
        }
        Command::Dismiss { id } => {
            session.data.dismiss_alert(&id);
            session.save()?;
            println!("Dismissed {}.", id);
            Ok(())
        }
    }
}

fn sections_or_all(sections: Vec<BackupSection>) -> Vec<BackupSection> {
    if sections.is_empty() {
        BackupSection::ALL.to_vec()
    } else {
        sections
    }
}

/// Alerts plus the per-category overview.
fn cmd_status(session: &Session) -> Result<()> {
    let categories = session.data.categories();
    let recommended = session.data.recommended_items();

    let ctx = DashboardContext {
        categories: &categories,
        recommended_items: &recommended,
        disabled_recommended_items: &session.data.disabled_recommended_items,
        dismissed_alert_ids: &session.data.dismissed_alert_ids,
        options: &session.options,
        today: session.today,
        last_backup_date: session.data.last_backup_date,
    };
    let alerts = generate_dashboard_alerts(
        session.data.inventory.items(),
        &EnglishTranslator,
        &session.data.household,
        &ctx,
    );

    let inputs = session.inputs(&recommended);
    let reports: Vec<(&Category, CategoryReport)> = categories
        .iter()
        .map(|c| (c, calculate_category(&c.id, &inputs)))
        .collect();

    display_alerts(&alerts);
    display_category_summary(&reports);
    Ok(())
}

fn cmd_shortages(session: &Session, category: Option<&str>) -> Result<()> {
    let categories = session.data.categories();
    let recommended = session.data.recommended_items();
    let inputs = session.inputs(&recommended);

    let selected: Vec<&Category> = match category {
        Some(id) => vec![categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| SupplyError::CategoryNotFound(id.to_string()))?],
        None => categories.iter().collect(),
    };

    for category in selected {
        let report = calculate_category(&category.id, &inputs);
        display_category_report(category, &report);
    }
    Ok(())
}

fn cmd_household(session: &mut Session, action: HouseholdAction) -> Result<()> {
    match action {
        HouseholdAction::Show => {
            display_household(&session.data.household, &session.options);
            return Ok(());
        }
        HouseholdAction::Set {
            adults,
            children,
            pets,
            days,
            freezer,
            freezer_hours,
        } => {
            let mut input = HouseholdConfigInput::from(&session.data.household);
            input.adults = adults.unwrap_or(input.adults);
            input.children = children.unwrap_or(input.children);
            input.pets = pets.unwrap_or(input.pets);
            input.supply_duration_days = days.unwrap_or(input.supply_duration_days);
            input.use_freezer = freezer.unwrap_or(input.use_freezer);
            if freezer_hours.is_some() {
                input.freezer_hold_time_hours = freezer_hours;
            }
            session.data.household = HouseholdConfigFactory::create(input)?;
        }
        HouseholdAction::Preset { preset } => {
            let current = &session.data.household;
            let preset = HouseholdConfigFactory::from_preset(preset);
            session.data.household = HouseholdConfig {
                adults: preset.adults,
                children: preset.children,
                ..current.clone()
            };
        }
        HouseholdAction::Setup => {
            session.data.household = prompt_household(&session.data.household)?;
        }
    }

    info!(household = %session.data.household.debug_string(), "household changed");
    session.save()?;
    display_household(&session.data.household, &session.options);
    Ok(())
}

fn cmd_settings(session: &mut Session, save: bool) -> Result<()> {
    let options = &session.options;
    println!("Children multiplier:        {}", options.children_multiplier);
    println!("Daily calories per person:  {}", options.daily_calories_per_person);
    println!("Daily water per person (L): {}", options.daily_water_per_person);

    if save {
        session.data.set_settings(session.options.clone())?;
        session.save()?;
        println!("Settings saved.");
    }
    Ok(())
}

fn cmd_add(session: &mut Session, args: AddItem) -> Result<()> {
    let recommended = session.data.recommended_items();
    let categories = session.data.categories();

    let new = match (&args.recommended, &args.custom) {
        (Some(query), None) => {
            let Some(rec) = resolve_recommended_item(query, &recommended)? else {
                return Ok(());
            };
            let mut new = NewInventoryItem::new(
                args.name.clone().unwrap_or_else(|| rec.name.clone()),
                rec.category.clone(),
                rec.id.clone(),
                args.quantity,
                args.unit.unwrap_or(rec.unit),
            );
            if args.expires.is_none() && !args.never_expires {
                new.expiration_date = rec
                    .default_expiration_months
                    .and_then(|months| session.today.checked_add_months(Months::new(months)));
            }
            new
        }
        (None, Some(name)) => {
            let category = args.category.clone().ok_or_else(|| {
                SupplyError::InvalidInput("--category is required for custom items".to_string())
            })?;
            let mut new = NewInventoryItem::new(
                name.clone(),
                category,
                CUSTOM_ITEM_TYPE,
                args.quantity,
                args.unit.unwrap_or(Unit::Pieces),
            );
            if let Some(target) = &args.satisfies {
                if !recommended.iter().any(|rec| &rec.id == target) {
                    return Err(SupplyError::ItemNotFound(target.clone()));
                }
                new.satisfies_recommendation = Some(target.clone());
            }
            new
        }
        _ => {
            return Err(SupplyError::InvalidInput(
                "pass either --recommended or --custom".to_string(),
            ))
        }
    };

    let new = NewInventoryItem {
        expiration_date: args.expires.or(new.expiration_date),
        never_expires: args.never_expires,
        requires_water_liters: args.water_per_unit,
        calories_per_unit: args.calories_per_unit,
        location: args.location,
        notes: args.notes,
        ..new
    };

    let item = session.data.inventory.add_item(new, &categories)?;
    println!("Added {} {} {} (id {}).", item.quantity, item.unit, item.name, item.id);
    session.save()
}

fn cmd_category(session: &mut Session, action: CategoryAction) -> Result<()> {
    match action {
        CategoryAction::List => {
            display_categories(&session.data.categories());
            return Ok(());
        }
        CategoryAction::Add { id, name, icon } => {
            session.data.add_custom_category(&id, &name, icon)?;
            println!("Added category {}.", id);
        }
        CategoryAction::Remove { id } => {
            let removed = session.data.remove_custom_category(&id)?;
            println!("Removed category {}.", removed.name);
        }
    }
    session.save()
}

fn cmd_kit(session: &mut Session, action: KitAction) -> Result<()> {
    match action {
        KitAction::List => {
            display_kits(&session.data.kits(), &session.data.active_kit_id);
            return Ok(());
        }
        KitAction::Import { path, select } => {
            let json = std::fs::read_to_string(&path)?;
            let kit = Kit::from_json(&json, &session.data.categories())?;
            let (id, name, count) = (kit.id.clone(), kit.name.clone(), kit.items.len());
            session.data.import_kit(kit)?;
            println!("Imported kit {} with {} items.", name, count);
            if select {
                session.data.select_kit(&id)?;
                println!("Kit {} is now active.", id);
            }
        }
        KitAction::Select { id } => {
            session.data.select_kit(&id)?;
            println!("Kit {} is now active.", id);
        }
        KitAction::Remove { id } => {
            let removed = session.data.remove_kit(&id)?;
            println!("Removed kit {}.", removed.name);
        }
    }
    session.save()
}
