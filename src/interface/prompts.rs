use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::Result;
use crate::models::{
    HouseholdConfig, HouseholdConfigFactory, HouseholdConfigInput, RecommendedItemDefinition,
};

/// Minimum similarity for a fuzzy match to be offered.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum number of fuzzy candidates shown at once.
const MAX_CANDIDATES: usize = 5;

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Walk the user through the household form, re-asking until it validates.
pub fn prompt_household(current: &HouseholdConfig) -> Result<HouseholdConfig> {
    let mut input = HouseholdConfigInput::from(current);

    loop {
        input.adults = Input::new()
            .with_prompt("How many adults?")
            .default(input.adults)
            .interact_text()?;
        input.children = Input::new()
            .with_prompt("How many children?")
            .default(input.children)
            .interact_text()?;
        input.pets = Input::new()
            .with_prompt("How many pets?")
            .default(input.pets)
            .interact_text()?;
        input.supply_duration_days = Input::new()
            .with_prompt("For how many days should supplies last?")
            .default(input.supply_duration_days)
            .interact_text()?;
        input.use_freezer = prompt_yes_no("Do you use a freezer for supplies?", input.use_freezer)?;
        input.freezer_hold_time_hours = if input.use_freezer {
            let hours: f64 = Input::new()
                .with_prompt("How many hours does the freezer keep food frozen without power?")
                .default(input.freezer_hold_time_hours.unwrap_or(24.0))
                .interact_text()?;
            Some(hours)
        } else {
            None
        };

        match HouseholdConfigFactory::create(input.clone()) {
            Ok(config) => return Ok(config),
            Err(err) => {
                for violation in &err.violations {
                    println!("  {}", violation);
                }
                println!("Please correct the values above.");
            }
        }
    }
}

/// Recommendations whose name or id resembles `query`, best first.
pub fn fuzzy_matches<'a>(
    query: &str,
    recommended: &'a [RecommendedItemDefinition],
) -> Vec<(&'a RecommendedItemDefinition, f64)> {
    let query = query.trim().to_lowercase();
    let mut candidates: Vec<(&RecommendedItemDefinition, f64)> = recommended
        .iter()
        .map(|rec| {
            let by_name = jaro_winkler(&rec.name.to_lowercase(), &query);
            let by_id = jaro_winkler(&rec.id, &query);
            (rec, by_name.max(by_id))
        })
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}

/// Exact id or name match, case-insensitive.
pub fn find_exact<'a>(
    query: &str,
    recommended: &'a [RecommendedItemDefinition],
) -> Option<&'a RecommendedItemDefinition> {
    let query = query.trim().to_lowercase();
    recommended
        .iter()
        .find(|rec| rec.id == query || rec.name.to_lowercase() == query)
}

/// Resolve user text to a recommendation, asking when the match is fuzzy.
pub fn resolve_recommended_item<'a>(
    query: &str,
    recommended: &'a [RecommendedItemDefinition],
) -> Result<Option<&'a RecommendedItemDefinition>> {
    if let Some(rec) = find_exact(query, recommended) {
        return Ok(Some(rec));
    }

    let candidates = fuzzy_matches(query, recommended);

    match candidates.as_slice() {
        [] => {
            println!("No recommended item matches '{}'", query);
            Ok(None)
        }
        [(rec, _)] => {
            let confirm = prompt_yes_no(&format!("Did you mean '{}'?", rec.name), true)?;
            Ok(confirm.then_some(*rec))
        }
        many => {
            let options: Vec<&str> = many
                .iter()
                .take(MAX_CANDIDATES)
                .map(|(rec, _)| rec.name.as_str())
                .collect();

            let mut selection_options = options.clone();
            selection_options.push("None of these");

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&selection_options)
                .default(0)
                .interact()?;

            Ok(many.get(selection).filter(|_| selection < options.len()).map(|(rec, _)| *rec))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::built_in_kit;

    #[test]
    fn test_find_exact_by_id_or_name() {
        let kit = built_in_kit();
        assert_eq!(find_exact("bottled-water", &kit.items).map(|r| r.id.as_str()), Some("bottled-water"));
        assert_eq!(find_exact("Canned Soup", &kit.items).map(|r| r.id.as_str()), Some("canned-soup"));
        assert!(find_exact("caviar", &kit.items).is_none());
    }

    #[test]
    fn test_fuzzy_matches_typo() {
        let kit = built_in_kit();
        let matches = fuzzy_matches("flashlite", &kit.items);
        assert!(!matches.is_empty());
        assert_eq!(matches[0].0.id, "flashlight");
        assert!(matches.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}
