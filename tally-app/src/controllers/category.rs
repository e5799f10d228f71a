use serde_json::{json, Value};
use tally_core::prelude::*;
use tally_openapi::schema_ref;

pub struct CategoryController;

fn id_param() -> ParamSpec {
    ParamSpec::new("id", "string")
        .required(true)
        .description("Category ID")
}

fn category_input(required: bool) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "minLength": 1, "maxLength": 50 },
            "color": { "type": "string", "pattern": "^#[0-9A-Fa-f]{6}$" }
        }
    });
    if required {
        schema["required"] = json!(["name"]);
    }
    schema
}

impl Controller for CategoryController {
    fn declare(api: &mut Annotations<'_, Self>) {
        api.controller("/categories", ["Categories"]);

        api.member("get_categories")
            .get("")
            .operation(
                OperationSpec::new("Get all categories")
                    .description("Retrieve all categories (predefined and custom)"),
            )
            .response(
                ResponseSpec::new("200", "List of categories")
                    .schema(json!({ "type": "array", "items": schema_ref("Category") })),
            );

        api.member("get_category_by_id")
            .get("/{id}")
            .operation(
                OperationSpec::new("Get category by ID")
                    .description("Retrieve a specific category by its ID"),
            )
            .param(id_param())
            .response(ResponseSpec::new("200", "Category details").schema(schema_ref("Category")))
            .response(ResponseSpec::new("404", "Category not found").schema(schema_ref("ErrorResponse")));

        api.member("create_category")
            .post("")
            .operation(
                OperationSpec::new("Create a new category")
                    .description("Create a custom category (predefined categories cannot be created)"),
            )
            .body(BodySpec::new("Category data", category_input(true)))
            .response(ResponseSpec::new("201", "Category created successfully").schema(schema_ref("Category")))
            .response(ResponseSpec::new("400", "Category with this name already exists"));

        api.member("update_category")
            .put("/{id}")
            .operation(
                OperationSpec::new("Update a category")
                    .description("Update a custom category (predefined categories cannot be updated)"),
            )
            .param(id_param())
            .body(BodySpec::new("Updated category data", category_input(false)))
            .response(ResponseSpec::new("200", "Category updated successfully"))
            .response(ResponseSpec::new("403", "Cannot update predefined categories"))
            .response(ResponseSpec::new("404", "Category not found"));

        api.member("delete_category")
            .delete("/{id}")
            .operation(
                OperationSpec::new("Delete a category")
                    .description("Delete a custom category (predefined categories cannot be deleted)"),
            )
            .param(id_param())
            .response(ResponseSpec::new("200", "Category deleted successfully"))
            .response(ResponseSpec::new("403", "Cannot delete predefined categories"))
            .response(ResponseSpec::new("404", "Category not found"));
    }
}
