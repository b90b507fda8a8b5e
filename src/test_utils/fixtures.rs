use crate::catalog::CatalogItem;

/// Shorthand item constructor.
pub fn item(identifier: &str, name: &str, description: &str, category: &str) -> CatalogItem {
    CatalogItem::new(identifier, name, description, category)
}

/// The BMI / mortgage pair used by the acceptance scenarios.
pub fn two_item_catalog() -> Vec<CatalogItem> {
    vec![
        item(
            "bmi-calculator",
            "BMI Calculator",
            "Calculate body mass index from height and weight",
            "health",
        ),
        item(
            "mortgage-calculator",
            "Mortgage Calculator",
            "Estimate monthly mortgage payments",
            "finance",
        ),
    ]
}

/// A small mixed catalog across finance, health and unit conversion.
pub fn sample_catalog() -> Vec<CatalogItem> {
    vec![
        item(
            "bmi-calculator",
            "BMI Calculator",
            "Calculate body mass index from height and weight",
            "health",
        )
        .with_keywords(["obesity", "body fat"]),
        item(
            "mortgage-calculator",
            "Mortgage Calculator",
            "Estimate monthly mortgage payments",
            "finance",
        )
        .with_keywords(["home loan", "house"]),
        item(
            "retirement-calculator",
            "Retirement Calculator",
            "Estimate how many years until you can retire and how much to save",
            "finance",
        )
        .with_keywords(["pension", "401k"]),
        item(
            "compound-interest-calculator",
            "Compound Interest Calculator",
            "Project savings growth with compound interest over time",
            "finance",
        )
        .with_keywords(["savings", "investment"]),
        item(
            "psi-to-bar",
            "PSI to Bar Converter",
            "Convert pressure from pounds per square inch to bar",
            "units",
        )
        .with_keywords(["pressure", "tire"]),
        item(
            "celsius-to-fahrenheit",
            "Celsius to Fahrenheit Converter",
            "Convert temperature from Celsius to Fahrenheit",
            "units",
        )
        .with_keywords(["temperature", "weather"]),
        item(
            "calorie-calculator",
            "Calorie Calculator",
            "Estimate daily calorie needs from age, weight and activity level",
            "health",
        )
        .with_keywords(["diet", "tdee"]),
        item(
            "tip-calculator",
            "Tip Calculator",
            "Work out the tip and split a restaurant bill",
            "finance",
        )
        .with_keywords(["gratuity"]),
    ]
}
