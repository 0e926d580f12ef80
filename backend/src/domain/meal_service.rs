//! Meal planning service: template CRUD, compliance review, and catalog
//! lookups for the kitchen.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{debug, info, warn};

use shared::{
    AgeGroup, CreateMealTemplateRequest, GroceryItem, MealTemplate, MealTemplateListResponse,
    MealTemplateResponse, UpdateMealTemplateRequest,
};

use crate::fixtures;
use crate::storage::memory::MemoryConnection;

/// Service for managing meal planning in the center
#[derive(Clone)]
pub struct MealPlanningService {
    connection: MemoryConnection,
}

impl MealPlanningService {
    /// Create a new MealPlanningService
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }

    /// Create a meal template. New templates start unreviewed.
    pub fn create_template(
        &self,
        request: CreateMealTemplateRequest,
    ) -> Result<MealTemplateResponse> {
        info!("Creating meal template: {}", request.name);

        self.validate_template_name(&request.name)?;
        if request.ingredients.is_empty() {
            return Err(anyhow!("Meal template must have at least one ingredient"));
        }

        let now = Utc::now();
        let mut template = MealTemplate {
            id: String::new(),
            name: request.name.trim().to_string(),
            ingredients: request.ingredients,
            target_age_groups: request.target_age_groups,
            dietary_tags: request.dietary_tags,
            compliant: false,
            compliance_notes: String::new(),
            created_at: now,
            updated_at: now,
        };

        let id = self
            .connection
            .with_store_mut(|store| store.meal_templates_mut().add(template.clone()));
        template.id = id;

        info!("Created meal template: {} with ID: {}", template.name, template.id);

        Ok(MealTemplateResponse {
            template,
            success_message: "Meal template created successfully".to_string(),
        })
    }

    /// Get a template by ID
    pub fn get_template(&self, template_id: &str) -> Result<Option<MealTemplate>> {
        Ok(self
            .connection
            .with_store(|store| store.meal_templates().get(template_id).cloned()))
    }

    /// All templates in creation order
    pub fn list_templates(&self) -> Result<MealTemplateListResponse> {
        let templates = self
            .connection
            .with_store(|store| store.meal_templates().iter().cloned().collect());
        Ok(MealTemplateListResponse { templates })
    }

    /// Update a template. Returns `Ok(None)` when it does not exist.
    pub fn update_template(
        &self,
        template_id: &str,
        request: UpdateMealTemplateRequest,
    ) -> Result<Option<MealTemplateResponse>> {
        info!("Updating meal template: {}", template_id);

        if let Some(ref name) = request.name {
            self.validate_template_name(name)?;
        }

        let updated = self.connection.with_store_mut(|store| {
            let touched = store.meal_templates_mut().update(template_id, |template| {
                if let Some(name) = request.name {
                    template.name = name.trim().to_string();
                }
                if let Some(ingredients) = request.ingredients {
                    template.ingredients = ingredients;
                }
                if let Some(target_age_groups) = request.target_age_groups {
                    template.target_age_groups = target_age_groups;
                }
                if let Some(dietary_tags) = request.dietary_tags {
                    template.dietary_tags = dietary_tags;
                }
                template.updated_at = Utc::now();
            });
            if touched {
                store.meal_templates().get(template_id).cloned()
            } else {
                None
            }
        });

        match updated {
            Some(template) => Ok(Some(MealTemplateResponse {
                template,
                success_message: "Meal template updated successfully".to_string(),
            })),
            None => {
                warn!("Meal template not found for update: {}", template_id);
                Ok(None)
            }
        }
    }

    /// Remove a template
    pub fn remove_template(&self, template_id: &str) -> Result<Option<MealTemplate>> {
        info!("Removing meal template: {}", template_id);

        let removed = self
            .connection
            .with_store_mut(|store| store.meal_templates_mut().remove(template_id));

        if removed.is_none() {
            warn!("Meal template not found for removal: {}", template_id);
        }

        Ok(removed)
    }

    /// Record a compliance review verdict on a template
    pub fn set_compliance(
        &self,
        template_id: &str,
        compliant: bool,
        notes: &str,
    ) -> Result<Option<MealTemplateResponse>> {
        info!(
            "Recording compliance review for {}: compliant={}",
            template_id, compliant
        );

        let updated = self.connection.with_store_mut(|store| {
            let touched = store.meal_templates_mut().update(template_id, |template| {
                template.compliant = compliant;
                template.compliance_notes = notes.to_string();
                template.updated_at = Utc::now();
            });
            if touched {
                store.meal_templates().get(template_id).cloned()
            } else {
                None
            }
        });

        match updated {
            Some(template) => Ok(Some(MealTemplateResponse {
                template,
                success_message: "Compliance review recorded".to_string(),
            })),
            None => {
                warn!("Meal template not found for review: {}", template_id);
                Ok(None)
            }
        }
    }

    /// Templates suitable for an age group
    pub fn templates_for_age_group(&self, age_group: AgeGroup) -> Result<MealTemplateListResponse> {
        let templates = self.connection.with_store(|store| {
            store
                .meal_templates()
                .iter()
                .filter(|template| template.target_age_groups.contains(&age_group))
                .cloned()
                .collect()
        });
        Ok(MealTemplateListResponse { templates })
    }

    /// Templates carrying a dietary tag, matched case-insensitively
    pub fn templates_with_tag(&self, tag: &str) -> Result<MealTemplateListResponse> {
        let templates = self.connection.with_store(|store| {
            store
                .meal_templates()
                .iter()
                .filter(|template| {
                    template
                        .dietary_tags
                        .iter()
                        .any(|t| t.eq_ignore_ascii_case(tag))
                })
                .cloned()
                .collect()
        });
        Ok(MealTemplateListResponse { templates })
    }

    /// Load the preset templates, skipping any whose name is already
    /// taken. Returns the number added.
    pub fn seed_presets(&self) -> Result<usize> {
        info!("Seeding preset meal templates");

        let added = self.connection.with_store_mut(|store| {
            let mut added = 0;
            for preset in fixtures::preset_meal_templates() {
                let taken = store
                    .meal_templates()
                    .iter()
                    .any(|template| template.name.eq_ignore_ascii_case(&preset.name));
                if !taken {
                    store.meal_templates_mut().add(preset);
                    added += 1;
                }
            }
            added
        });

        info!("Seeded {} preset meal templates", added);
        Ok(added)
    }

    /// Grocery catalog rows in a category
    pub fn grocery_items_in_category(&self, category: &str) -> Result<Vec<GroceryItem>> {
        debug!("Looking up grocery category: {}", category);
        Ok(fixtures::grocery_items_in_category(category))
    }

    /// Look up one grocery catalog row by name
    pub fn find_grocery_item(&self, name: &str) -> Result<Option<GroceryItem>> {
        debug!("Looking up grocery item: {}", name);
        Ok(fixtures::find_grocery_item(name))
    }

    /// Validate a template name against the configured length limit
    fn validate_template_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow!("Template name cannot be empty"));
        }

        let max = self.connection.config().max_name_length;
        if name.len() > max {
            return Err(anyhow!("Template name cannot exceed {} characters", max));
        }

        Ok(())
    }
}
