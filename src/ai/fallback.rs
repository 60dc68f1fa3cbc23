use crate::ai::AiSnack;
use crate::snacks::dto::{GenerateSnackRequest, PreferredDiet, SnackType};

/// Deterministic, network-free recommendation used whenever the backend is
/// unavailable or its output cannot be parsed. Pure: the same
/// (snack type, diet, caloric limit) always yields the same recipe.
pub fn fallback_recommendation(prefs: &GenerateSnackRequest) -> AiSnack {
    let mut snack = match (prefs.preferred_diet, prefs.snack_type) {
        (PreferredDiet::Vegetarian, SnackType::Filling) => egg_avocado_sandwich(),
        (PreferredDiet::Vegan, SnackType::Sweet) => chia_pudding(),
        (PreferredDiet::Vegan, SnackType::Filling) => tofu_wrap(),
        (_, snack_type) => base_recipe(snack_type),
    };

    if let Some(limit) = prefs.caloric_limit {
        let limit = f64::from(limit);
        if snack.kcal > limit {
            // Scale the portion down to meet the caloric limit.
            let factor = limit / snack.kcal;
            snack.kcal = (snack.kcal * factor).round();
            snack.protein = round1(snack.protein * factor);
            snack.fat = round1(snack.fat * factor);
            snack.carbohydrates = round1(snack.carbohydrates * factor);
            snack.fibre = round1(snack.fibre * factor);
            snack.description = format!("Smaller portion: {}", snack.description);
        }
    }

    snack
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn base_recipe(snack_type: SnackType) -> AiSnack {
    match snack_type {
        SnackType::Sweet => AiSnack {
            title: "Yogurt with honey and nuts".into(),
            description: "A quick, nourishing Greek yogurt dessert topped with honey and walnuts."
                .into(),
            ingredients: "150g Greek yogurt\n1 tbsp honey\n10g walnuts\npinch of cinnamon".into(),
            instructions: "Stir the honey into the yogurt. Top with walnuts and cinnamon.".into(),
            kcal: 220.0,
            protein: 12.0,
            fat: 10.0,
            carbohydrates: 18.0,
            fibre: 1.5,
        },
        SnackType::Salty => AiSnack {
            title: "Hummus with vegetables".into(),
            description: "Creamy hummus served with fresh vegetable sticks.".into(),
            ingredients: "3 tbsp hummus\n1 carrot\n1 bell pepper\n5 cucumber slices".into(),
            instructions: "Cut the vegetables into sticks. Serve with the hummus.".into(),
            kcal: 180.0,
            protein: 6.0,
            fat: 9.0,
            carbohydrates: 15.0,
            fibre: 6.0,
        },
        SnackType::Light => AiSnack {
            title: "Seasonal fruit bowl".into(),
            description: "A refreshing bowl of mixed seasonal fruit.".into(),
            ingredients: "100g strawberries\n50g blueberries\n1 kiwi\n1/2 banana".into(),
            instructions: "Wash and chop the fruit. Serve in a bowl.".into(),
            kcal: 120.0,
            protein: 2.0,
            fat: 1.0,
            carbohydrates: 25.0,
            fibre: 5.0,
        },
        SnackType::Filling => AiSnack {
            title: "Turkey and avocado sandwich".into(),
            description: "A hearty wholegrain sandwich with turkey and creamy avocado.".into(),
            ingredients:
                "2 slices wholegrain bread\n50g turkey breast\n1/2 avocado\nlettuce leaves\n1 tomato slice"
                    .into(),
            instructions: "Spread the avocado on the bread. Layer the turkey, lettuce and tomato."
                .into(),
            kcal: 320.0,
            protein: 18.0,
            fat: 14.0,
            carbohydrates: 30.0,
            fibre: 8.0,
        },
    }
}

fn egg_avocado_sandwich() -> AiSnack {
    AiSnack {
        title: "Egg and avocado sandwich".into(),
        description: "A hearty vegetarian sandwich with egg and creamy avocado.".into(),
        ingredients:
            "2 slices wholegrain bread\n1 hard-boiled egg\n1/2 avocado\nlettuce leaves\n1 tomato slice"
                .into(),
        instructions: "Spread the avocado on the bread. Layer the egg slices, lettuce and tomato."
            .into(),
        kcal: 300.0,
        protein: 14.0,
        fat: 16.0,
        carbohydrates: 28.0,
        fibre: 7.0,
    }
}

fn chia_pudding() -> AiSnack {
    AiSnack {
        title: "Chia pudding with berries".into(),
        description: "A vegan chia seed pudding with berries and maple syrup.".into(),
        ingredients: "3 tbsp chia seeds\n250ml plant milk\n1 tbsp maple syrup\nhandful of berries"
            .into(),
        instructions:
            "Mix the chia seeds with the plant milk and syrup. Rest for 15 minutes. Top with berries."
                .into(),
        kcal: 200.0,
        protein: 6.0,
        fat: 9.0,
        carbohydrates: 22.0,
        fibre: 10.0,
    }
}

fn tofu_wrap() -> AiSnack {
    AiSnack {
        title: "Tofu and vegetable wrap".into(),
        description: "A filling wrap with marinated tofu and colourful vegetables.".into(),
        ingredients:
            "1 wholegrain tortilla\n80g marinated tofu\n1/4 bell pepper\nhandful of spinach\n2 tbsp hummus"
                .into(),
        instructions:
            "Spread the hummus on the tortilla. Add the sliced tofu and vegetables. Roll into a wrap."
                .into(),
        kcal: 310.0,
        protein: 15.0,
        fat: 12.0,
        carbohydrates: 32.0,
        fibre: 7.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(snack_type: &str, diet: &str, limit: Option<i32>) -> GenerateSnackRequest {
        serde_json::from_value(serde_json::json!({
            "meals_eaten": "a sandwich",
            "snack_type": snack_type,
            "location": "home",
            "goal": "maintain",
            "preferred_diet": diet,
            "caloric_limit": limit,
        }))
        .expect("request should deserialize")
    }

    #[test]
    fn fallback_is_pure() {
        let p = prefs("salty", "standard", Some(150));
        let a = fallback_recommendation(&p);
        let b = fallback_recommendation(&p);
        assert_eq!(a.title, b.title);
        assert_eq!(a.description, b.description);
        assert_eq!(a.kcal, b.kcal);
        assert_eq!(a.protein, b.protein);
    }

    #[test]
    fn vegan_sweet_gets_the_pudding_override() {
        let snack = fallback_recommendation(&prefs("sweet", "vegan", None));
        assert_eq!(snack.title, "Chia pudding with berries");
        assert_eq!(snack.kcal, 200.0);
    }

    #[test]
    fn vegetarian_filling_gets_the_egg_sandwich() {
        let snack = fallback_recommendation(&prefs("filling", "vegetarian", None));
        assert_eq!(snack.title, "Egg and avocado sandwich");
        assert_eq!(snack.kcal, 300.0);
    }

    #[test]
    fn diet_override_only_applies_to_matching_combinations() {
        let snack = fallback_recommendation(&prefs("salty", "vegan", None));
        assert_eq!(snack.title, "Hummus with vegetables");
    }

    #[test]
    fn caloric_limit_scales_the_portion() {
        // Base sweet recipe: 220 kcal, 12g protein.
        let snack = fallback_recommendation(&prefs("sweet", "standard", Some(100)));
        assert_eq!(snack.kcal, 100.0);
        assert_eq!(snack.protein, 5.5);
        assert!(snack.description.starts_with("Smaller portion: "));
    }

    #[test]
    fn limit_above_base_kcal_leaves_recipe_untouched() {
        let snack = fallback_recommendation(&prefs("light", "standard", Some(500)));
        assert_eq!(snack.kcal, 120.0);
        assert!(!snack.description.starts_with("Smaller portion"));
    }
}
