//! Preference form wizard: a pure state machine over the seven questionnaire
//! steps. Front ends drive it with [`FormAction`]s; all sequencing, validation
//! and skip semantics live here so they can be tested without any UI.

use crate::snacks::dto::{
    GenerateSnackRequest, Goal, Location, PreferredDiet, SnackDetailsResponse, SnackType,
    CALORIC_LIMIT_MAX, CALORIC_LIMIT_MIN,
};

pub const TOTAL_STEPS: u8 = 7;

/// Step bound to each preference field. Steps 6 and 7 are optional and
/// skippable; the rest must validate before the wizard advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Meals = 1,
    SnackType,
    Location,
    Goal,
    PreferredDiet,
    DietaryRestrictions,
    CaloricLimit,
}

impl Step {
    fn from_index(index: u8) -> Step {
        match index {
            1 => Step::Meals,
            2 => Step::SnackType,
            3 => Step::Location,
            4 => Step::Goal,
            5 => Step::PreferredDiet,
            6 => Step::DietaryRestrictions,
            _ => Step::CaloricLimit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub current_step: u8,
    pub meals_eaten: String,
    pub snack_type: Option<SnackType>,
    pub location: Option<Location>,
    pub goal: Option<Goal>,
    pub preferred_diet: Option<PreferredDiet>,
    pub dietary_restrictions: Vec<String>,
    pub caloric_limit: Option<i32>,
    pub is_loading: bool,
    pub recommendation: Option<SnackDetailsResponse>,
    pub error: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            current_step: 1,
            meals_eaten: String::new(),
            snack_type: None,
            location: None,
            goal: None,
            preferred_diet: None,
            dietary_restrictions: Vec::new(),
            caloric_limit: None,
            is_loading: false,
            recommendation: None,
            error: None,
        }
    }
}

impl FormState {
    pub fn step(&self) -> Step {
        Step::from_index(self.current_step)
    }
}

#[derive(Debug, Clone)]
pub enum FormAction {
    SetMeals(String),
    SetSnackType(SnackType),
    SetLocation(Location),
    SetGoal(Goal),
    SetPreferredDiet(PreferredDiet),
    SetDietaryRestrictions(Vec<String>),
    SetCaloricLimit(Option<i32>),
    NextStep,
    PrevStep,
    SkipStep,
    SetLoading(bool),
    SetRecommendation(SnackDetailsResponse),
    ClearRecommendation,
    SetError(String),
    ClearError,
    Reset,
}

/// Total transition function. Returns a new state value; `NextStep` and
/// `PrevStep` clamp at the edges, `SkipStep` additionally resets the optional
/// field bound to the current step. Raw transitions never validate — gating
/// belongs to [`try_advance`] and [`submit_request`].
pub fn reduce(state: FormState, action: FormAction) -> FormState {
    match action {
        FormAction::SetMeals(meals) => FormState {
            meals_eaten: meals,
            ..state
        },
        FormAction::SetSnackType(snack_type) => FormState {
            snack_type: Some(snack_type),
            ..state
        },
        FormAction::SetLocation(location) => FormState {
            location: Some(location),
            ..state
        },
        FormAction::SetGoal(goal) => FormState {
            goal: Some(goal),
            ..state
        },
        FormAction::SetPreferredDiet(diet) => FormState {
            preferred_diet: Some(diet),
            ..state
        },
        FormAction::SetDietaryRestrictions(tags) => FormState {
            dietary_restrictions: normalize_restrictions(tags),
            ..state
        },
        FormAction::SetCaloricLimit(limit) => FormState {
            caloric_limit: limit,
            ..state
        },
        FormAction::NextStep => FormState {
            current_step: state.current_step.min(TOTAL_STEPS - 1) + 1,
            ..state
        },
        FormAction::PrevStep => FormState {
            current_step: state.current_step.max(2) - 1,
            ..state
        },
        FormAction::SkipStep => {
            let mut next = match Step::from_index(state.current_step) {
                Step::DietaryRestrictions => FormState {
                    dietary_restrictions: Vec::new(),
                    ..state
                },
                Step::CaloricLimit => FormState {
                    caloric_limit: None,
                    ..state
                },
                _ => state,
            };
            next.current_step = next.current_step.min(TOTAL_STEPS - 1) + 1;
            next.error = None;
            next
        }
        FormAction::SetLoading(loading) => FormState {
            is_loading: loading,
            ..state
        },
        FormAction::SetRecommendation(recommendation) => FormState {
            recommendation: Some(recommendation),
            is_loading: false,
            ..state
        },
        FormAction::ClearRecommendation => FormState {
            recommendation: None,
            ..state
        },
        FormAction::SetError(message) => FormState {
            error: Some(message),
            is_loading: false,
            ..state
        },
        FormAction::ClearError => FormState {
            error: None,
            ..state
        },
        FormAction::Reset => FormState::default(),
    }
}

/// Case-folds, trims and deduplicates restriction tags, preserving the order
/// of first occurrence.
fn normalize_restrictions(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let folded = tag.trim().to_lowercase();
        if !folded.is_empty() && !seen.contains(&folded) {
            seen.push(folded);
        }
    }
    seen
}

/// Local validation for the current step.
pub fn validate_step(state: &FormState) -> Result<(), String> {
    match state.step() {
        Step::Meals => {
            if state.meals_eaten.trim().chars().count() < 3 {
                Err("Please describe what you ate today (minimum 3 characters)".into())
            } else {
                Ok(())
            }
        }
        Step::SnackType => require(state.snack_type.is_some()),
        Step::Location => require(state.location.is_some()),
        Step::Goal => require(state.goal.is_some()),
        Step::PreferredDiet => require(state.preferred_diet.is_some()),
        Step::DietaryRestrictions => Ok(()),
        Step::CaloricLimit => validate_caloric_limit(state.caloric_limit),
    }
}

fn require(present: bool) -> Result<(), String> {
    if present {
        Ok(())
    } else {
        Err("Please select an option to continue".into())
    }
}

pub fn validate_caloric_limit(limit: Option<i32>) -> Result<(), String> {
    match limit {
        None => Ok(()),
        Some(value) if value < CALORIC_LIMIT_MIN => {
            Err(format!("Minimum value is {CALORIC_LIMIT_MIN} kcal"))
        }
        Some(value) if value > CALORIC_LIMIT_MAX => {
            Err(format!("Maximum value is {CALORIC_LIMIT_MAX} kcal"))
        }
        Some(_) => Ok(()),
    }
}

/// Validate-then-advance. On failure the step is unchanged and the error slot
/// is set; on success the wizard advances (clamped) with the error cleared.
pub fn try_advance(state: FormState) -> FormState {
    match validate_step(&state) {
        Ok(()) => {
            let cleared = reduce(state, FormAction::ClearError);
            reduce(cleared, FormAction::NextStep)
        }
        Err(message) => reduce(state, FormAction::SetError(message)),
    }
}

/// Submission gate: every required field must be present. The optional
/// fields (restrictions, caloric limit) are passed through as-is.
pub fn submit_request(state: &FormState) -> Result<GenerateSnackRequest, String> {
    const MISSING: &str = "Please fill in all required form fields";

    if state.meals_eaten.trim().is_empty() {
        return Err(MISSING.into());
    }
    let snack_type = state.snack_type.ok_or(MISSING)?;
    let location = state.location.ok_or(MISSING)?;
    let goal = state.goal.ok_or(MISSING)?;
    let preferred_diet = state.preferred_diet.ok_or(MISSING)?;

    Ok(GenerateSnackRequest {
        meals_eaten: state.meals_eaten.clone(),
        snack_type,
        location,
        goal,
        preferred_diet,
        dietary_restrictions: state.dietary_restrictions.clone(),
        caloric_limit: state.caloric_limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_state() -> FormState {
        FormState {
            meals_eaten: "oatmeal with berries".into(),
            snack_type: Some(SnackType::Sweet),
            location: Some(Location::Home),
            goal: Some(Goal::Maintain),
            preferred_diet: Some(PreferredDiet::Vegan),
            ..FormState::default()
        }
    }

    #[test]
    fn next_clamps_at_the_last_step() {
        let mut state = FormState {
            current_step: TOTAL_STEPS,
            ..FormState::default()
        };
        state = reduce(state, FormAction::NextStep);
        assert_eq!(state.current_step, TOTAL_STEPS);
    }

    #[test]
    fn prev_clamps_at_the_first_step() {
        let state = reduce(FormState::default(), FormAction::PrevStep);
        assert_eq!(state.current_step, 1);
    }

    #[test]
    fn advance_is_blocked_until_the_step_validates() {
        let state = reduce(FormState::default(), FormAction::SetMeals("ab".into()));
        let state = try_advance(state);
        assert_eq!(state.current_step, 1);
        assert!(state.error.is_some());

        let state = reduce(state, FormAction::SetMeals("avocado toast".into()));
        let state = try_advance(state);
        assert_eq!(state.current_step, 2);
        assert!(state.error.is_none());
    }

    #[test]
    fn enum_steps_require_a_selection() {
        let mut state = FormState {
            current_step: 2,
            ..FormState::default()
        };
        state = try_advance(state);
        assert_eq!(state.current_step, 2);
        assert!(state.error.is_some());

        state = reduce(state, FormAction::SetSnackType(SnackType::Salty));
        state = try_advance(state);
        assert_eq!(state.current_step, 3);
    }

    #[test]
    fn out_of_range_caloric_limit_is_retained_but_blocks_next() {
        let mut state = FormState {
            current_step: TOTAL_STEPS,
            ..filled_state()
        };
        state = reduce(state, FormAction::SetCaloricLimit(Some(700)));
        state = try_advance(state);
        // Value stays visible, the error is set, the step does not move.
        assert_eq!(state.caloric_limit, Some(700));
        assert!(state.error.is_some());
        assert_eq!(state.current_step, TOTAL_STEPS);
    }

    #[test]
    fn skip_always_clears_the_field_and_never_dead_ends() {
        let mut state = FormState {
            current_step: TOTAL_STEPS,
            caloric_limit: Some(700),
            error: Some("Maximum value is 500 kcal".into()),
            ..filled_state()
        };
        state = reduce(state, FormAction::SkipStep);
        assert_eq!(state.caloric_limit, None);
        assert!(state.error.is_none());
        assert_eq!(state.current_step, TOTAL_STEPS);
    }

    #[test]
    fn skip_clears_dietary_restrictions_on_their_step() {
        let mut state = FormState {
            current_step: 6,
            dietary_restrictions: vec!["no nuts".into()],
            ..filled_state()
        };
        state = reduce(state, FormAction::SkipStep);
        assert!(state.dietary_restrictions.is_empty());
        assert_eq!(state.current_step, 7);
    }

    #[test]
    fn restrictions_are_case_folded_and_deduplicated() {
        let state = reduce(
            FormState::default(),
            FormAction::SetDietaryRestrictions(vec![
                "No Nuts".into(),
                "  no nuts ".into(),
                "Lactose".into(),
                "".into(),
            ]),
        );
        assert_eq!(state.dietary_restrictions, vec!["no nuts", "lactose"]);
    }

    #[test]
    fn submit_blocks_while_any_required_field_is_missing() {
        let mut state = filled_state();
        state.goal = None;
        assert!(submit_request(&state).is_err());

        state.goal = Some(Goal::Cut);
        let request = submit_request(&state).expect("all required fields present");
        assert_eq!(request.snack_type, SnackType::Sweet);
        assert_eq!(request.goal, Goal::Cut);
        assert!(request.caloric_limit.is_none());
    }

    #[test]
    fn reset_restores_the_initial_state() {
        let mut state = filled_state();
        state.current_step = 5;
        state.error = Some("boom".into());
        state = reduce(state, FormAction::Reset);
        assert_eq!(state.current_step, 1);
        assert!(state.meals_eaten.is_empty());
        assert!(state.snack_type.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn recommendation_arrival_clears_the_loading_flag() {
        let recommendation = SnackDetailsResponse {
            id: 1,
            title: "Chia pudding with berries".into(),
            description: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
            snack_type: "sweet".into(),
            location: "home".into(),
            goal: "maintain".into(),
            preferred_diet: "vegan".into(),
            kcal: 200.0,
            protein: 6.0,
            fat: 9.0,
            carbohydrates: 22.0,
            fibre: 10.0,
            created_at: time::OffsetDateTime::UNIX_EPOCH,
        };
        let state = reduce(
            FormState {
                is_loading: true,
                ..filled_state()
            },
            FormAction::SetRecommendation(recommendation),
        );
        assert!(!state.is_loading);
        assert!(state.recommendation.is_some());
    }
}
