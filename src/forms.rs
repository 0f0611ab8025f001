//! Form Validation
//!
//! Raw form state as typed by the user, and its conversion into request
//! bodies. A form that fails validation never reaches the network.

use chrono::NaiveDate;

use crate::models::{
    CatalogDraft, DiaryDraft, IngredientDraft, LocationDraft, ProductDraft, RecipeDraft, ShoppingDraft,
    TransactionDraft, TransactionKind,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Заполните поле «{0}»")]
    Required(&'static str),
    #[error("«{0}» должно быть числом")]
    NotANumber(&'static str),
    #[error("«{0}» должно быть больше нуля")]
    NotPositive(&'static str),
    #[error("«{0}» не может быть отрицательным")]
    Negative(&'static str),
    #[error("«{0}» должно быть целым числом")]
    NotAnInteger(&'static str),
    #[error("Дата должна быть в формате ГГГГ-ММ-ДД")]
    InvalidDate,
    #[error("Добавьте хотя бы один ингредиент")]
    NoIngredients,
}

fn required<'a>(raw: &'a str, label: &'static str) -> Result<&'a str, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::Required(label));
    }
    Ok(value)
}

fn optional(raw: &str) -> Option<String> {
    Some(raw.trim()).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Accepts a decimal comma
fn number(raw: &str, label: &'static str) -> Result<f64, ValidationError> {
    let value = required(raw, label)?;
    value
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(ValidationError::NotANumber(label))
}

fn positive(raw: &str, label: &'static str) -> Result<f64, ValidationError> {
    let value = number(raw, label)?;
    if value <= 0.0 {
        return Err(ValidationError::NotPositive(label));
    }
    Ok(value)
}

fn non_negative(raw: &str, label: &'static str) -> Result<f64, ValidationError> {
    let value = number(raw, label)?;
    if value < 0.0 {
        return Err(ValidationError::Negative(label));
    }
    Ok(value)
}

fn optional_integer(raw: &str, label: &'static str) -> Result<Option<i64>, ValidationError> {
    match optional(raw) {
        None => Ok(None),
        Some(value) => value.parse::<i64>().map(Some).map_err(|_| ValidationError::NotAnInteger(label)),
    }
}

fn optional_date(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    match optional(raw) {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ValidationError::InvalidDate),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingForm {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: String,
    pub notes: String,
}

impl Default for ShoppingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: String::new(),
            unit: "шт".to_string(),
            category: String::new(),
            notes: String::new(),
        }
    }
}

impl ShoppingForm {
    pub fn validate(&self) -> Result<ShoppingDraft, ValidationError> {
        Ok(ShoppingDraft {
            name: required(&self.name, "Название")?.to_string(),
            quantity: positive(&self.quantity, "Количество")?,
            unit: self.unit.clone(),
            category: optional(&self.category),
            notes: optional(&self.notes),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: String,
    pub expiry_date: String,
    pub notes: String,
    pub calories: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: String::new(),
            unit: "шт".to_string(),
            category: String::new(),
            expiry_date: String::new(),
            notes: String::new(),
            calories: String::new(),
        }
    }
}

impl ProductForm {
    pub fn from_product(product: &crate::models::Product) -> Self {
        Self {
            name: product.name.clone(),
            quantity: product.quantity.to_string(),
            unit: product.unit.clone(),
            category: product.category.clone().unwrap_or_default(),
            expiry_date: product
                .expiry_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            notes: product.notes.clone().unwrap_or_default(),
            calories: product.calories_per_100g.map(|c| c.round().to_string()).unwrap_or_default(),
        }
    }

    /// Editing allows a zero quantity, adding does not
    pub fn validate(&self, storage_location_id: i64, editing: bool) -> Result<ProductDraft, ValidationError> {
        let name = required(&self.name, "Название")?.to_string();
        let quantity = if editing {
            non_negative(&self.quantity, "Количество")?
        } else {
            positive(&self.quantity, "Количество")?
        };
        let calories = optional_integer(&self.calories, "Калории")?;
        if matches!(calories, Some(c) if c < 0) {
            return Err(ValidationError::Negative("Калории"));
        }
        Ok(ProductDraft {
            name,
            quantity,
            unit: self.unit.clone(),
            category: optional(&self.category),
            expiry_date: optional_date(&self.expiry_date)?,
            storage_location_id,
            notes: optional(&self.notes),
            calories_per_100g: calories.map(|c| c as f64),
        })
    }
}

pub fn location(name: &str, icon: &str, color: &str) -> Result<LocationDraft, ValidationError> {
    Ok(LocationDraft {
        name: required(name, "Название")?.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub kind: TransactionKind,
    pub amount: String,
    pub category_id: Option<i64>,
    pub description: String,
    pub date: String,
}

impl TransactionForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            kind: TransactionKind::Expense,
            amount: String::new(),
            category_id: None,
            description: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn validate(&self) -> Result<TransactionDraft, ValidationError> {
        let amount = positive(&self.amount, "Сумма")?;
        let date = optional_date(&self.date)?.ok_or(ValidationError::Required("Дата"))?;
        Ok(TransactionDraft {
            kind: self.kind,
            amount,
            category_id: self.category_id,
            description: optional(&self.description),
            date,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientForm {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

impl Default for IngredientForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: String::new(),
            unit: "г".to_string(),
        }
    }
}

impl IngredientForm {
    pub fn validate(&self) -> Result<IngredientDraft, ValidationError> {
        Ok(IngredientDraft {
            product_name: required(&self.name, "Ингредиент")?.to_string(),
            quantity: positive(&self.quantity, "Количество")?,
            unit: self.unit.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeForm {
    pub name: String,
    pub description: String,
    pub cooking_time: String,
    pub servings: String,
    pub calories: String,
    pub image_url: String,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            cooking_time: String::new(),
            servings: "1".to_string(),
            calories: String::new(),
            image_url: String::new(),
        }
    }
}

impl RecipeForm {
    pub fn from_recipe(recipe: &crate::models::Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            description: recipe.description.clone().unwrap_or_default(),
            cooking_time: recipe.cooking_time.map(|t| t.to_string()).unwrap_or_default(),
            servings: recipe.servings.to_string(),
            calories: recipe.total_calories.map(|c| c.round().to_string()).unwrap_or_default(),
            image_url: recipe.image_url.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self, ingredients: &[IngredientDraft]) -> Result<RecipeDraft, ValidationError> {
        let name = required(&self.name, "Название")?.to_string();
        if ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }
        let servings = optional_integer(&self.servings, "Порции")?.ok_or(ValidationError::Required("Порции"))?;
        if servings < 1 {
            return Err(ValidationError::NotPositive("Порции"));
        }
        let cooking_time = optional_integer(&self.cooking_time, "Время")?;
        let calories = match optional(&self.calories) {
            Some(_) => Some(non_negative(&self.calories, "Калории")?),
            None => None,
        };
        Ok(RecipeDraft {
            name,
            description: optional(&self.description),
            total_calories: calories,
            cooking_time,
            servings,
            image_url: optional(&self.image_url),
            ingredients: ingredients.to_vec(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiaryForm {
    pub meal_name: String,
    pub portion_weight: String,
    pub calories: String,
    pub meal_type: String,
}

impl DiaryForm {
    pub fn validate(&self, eaten_date: NaiveDate) -> Result<DiaryDraft, ValidationError> {
        Ok(DiaryDraft {
            meal_name: required(&self.meal_name, "Блюдо")?.to_string(),
            portion_weight: non_negative(&self.portion_weight, "Порция")?,
            calories: non_negative(&self.calories, "Калории")?,
            meal_type: optional(&self.meal_type),
            eaten_date: Some(eaten_date),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogForm {
    pub name: String,
    pub category: String,
    pub calories: String,
    pub default_unit: String,
}

impl Default for CatalogForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            calories: String::new(),
            default_unit: "г".to_string(),
        }
    }
}

impl CatalogForm {
    pub fn from_entry(entry: &crate::models::CatalogEntry) -> Self {
        Self {
            name: entry.name.clone(),
            category: entry.category.clone().unwrap_or_default(),
            calories: entry.calories_per_100g.map(|c| c.round().to_string()).unwrap_or_default(),
            default_unit: entry.default_unit.clone(),
        }
    }

    pub fn validate(&self) -> Result<CatalogDraft, ValidationError> {
        let name = required(&self.name, "Название")?.to_string();
        let calories = optional_integer(&self.calories, "Калории")?;
        if matches!(calories, Some(c) if c < 0) {
            return Err(ValidationError::Negative("Калории"));
        }
        Ok(CatalogDraft {
            name,
            category: optional(&self.category),
            calories_per_100g: calories.map(|c| c as f64),
            default_unit: self.default_unit.clone(),
        })
    }
}

pub fn calorie_goal(raw: &str) -> Result<i64, ValidationError> {
    let goal = optional_integer(raw, "Цель")?.ok_or(ValidationError::Required("Цель"))?;
    if goal <= 0 {
        return Err(ValidationError::NotPositive("Цель"));
    }
    Ok(goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shopping_requires_name_and_quantity() {
        let mut form = ShoppingForm {
            name: "Хлеб".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::Required("Количество")));

        form.quantity = "0".into();
        assert_eq!(form.validate(), Err(ValidationError::NotPositive("Количество")));

        form.quantity = "1,5".into();
        form.name = "   ".into();
        assert_eq!(form.validate(), Err(ValidationError::Required("Название")));

        form.name = " Хлеб ".into();
        let draft = form.validate().unwrap();
        assert_eq!(draft.name, "Хлеб");
        assert_eq!(draft.quantity, 1.5);
        assert_eq!(draft.category, None);
    }

    #[test]
    fn test_product_edit_allows_zero_quantity() {
        let form = ProductForm {
            name: "Сыр".into(),
            quantity: "0".into(),
            calories: "350".into(),
            expiry_date: "2026-11-01".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(3, false), Err(ValidationError::NotPositive("Количество")));

        let draft = form.validate(3, true).unwrap();
        assert_eq!(draft.storage_location_id, 3);
        assert_eq!(draft.calories_per_100g, Some(350.0));
        assert_eq!(draft.expiry_date, NaiveDate::from_ymd_opt(2026, 11, 1));

        let form = ProductForm {
            calories: "12.5".into(),
            ..form
        };
        assert_eq!(form.validate(3, true), Err(ValidationError::NotAnInteger("Калории")));
    }

    #[test]
    fn test_transaction_amount_and_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let mut form = TransactionForm::new(today);
        form.amount = "-5".into();
        assert_eq!(form.validate(), Err(ValidationError::NotPositive("Сумма")));

        form.amount = "250".into();
        form.date = "16.10.2026".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidDate));

        form.date = "2026-10-16".into();
        let draft = form.validate().unwrap();
        assert_eq!(draft.kind, TransactionKind::Expense);
        assert_eq!(draft.date, today);
    }

    #[test]
    fn test_recipe_needs_ingredient_and_servings() {
        let mut form = RecipeForm {
            name: "Плов".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(&[]), Err(ValidationError::NoIngredients));

        let rice = IngredientForm {
            name: "рис".into(),
            quantity: "200".into(),
            ..Default::default()
        }
        .validate()
        .unwrap();
        form.servings = "0".into();
        assert_eq!(form.validate(&[rice.clone()]), Err(ValidationError::NotPositive("Порции")));

        form.servings = "4".into();
        let draft = form.validate(&[rice]).unwrap();
        assert_eq!(draft.servings, 4);
        assert_eq!(draft.ingredients.len(), 1);
    }

    #[test]
    fn test_calorie_goal() {
        assert_eq!(calorie_goal("1800"), Ok(1800));
        assert_eq!(calorie_goal("0"), Err(ValidationError::NotPositive("Цель")));
        assert_eq!(calorie_goal("много"), Err(ValidationError::NotAnInteger("Цель")));
        assert_eq!(calorie_goal(""), Err(ValidationError::Required("Цель")));
    }

    #[test]
    fn test_location_name_is_trimmed() {
        assert_eq!(location("  ", "Package", "bg-blue-500"), Err(ValidationError::Required("Название")));
        assert_eq!(location(" Шкаф ", "Package", "bg-blue-500").unwrap().name, "Шкаф");
    }
}
