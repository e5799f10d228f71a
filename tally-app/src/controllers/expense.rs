use serde_json::{json, Value};
use tally_core::prelude::*;
use tally_openapi::schema_ref;

pub struct ExpenseController;

fn id_param() -> ParamSpec {
    ParamSpec::new("id", "string")
        .required(true)
        .description("Expense ID")
}

fn expense_input(required: &[&str]) -> Value {
    json!({
        "type": "object",
        "required": required,
        "properties": {
            "amount": { "type": "number", "minimum": 0.01 },
            "description": { "type": "string", "minLength": 1, "maxLength": 200 },
            "category": { "type": "string" },
            "date": { "type": "string", "format": "date-time" }
        }
    })
}

impl Controller for ExpenseController {
    fn declare(api: &mut Annotations<'_, Self>) {
        api.controller("/expenses", ["Expenses"]);

        api.member("create_expense")
            .post("")
            .operation(
                OperationSpec::new("Create a new expense")
                    .description("Add a new expense with amount, description, category, and date"),
            )
            .body(BodySpec::new(
                "Expense data",
                expense_input(&["amount", "description", "category", "date"]),
            ))
            .response(ResponseSpec::new("201", "Expense created successfully").schema(schema_ref("Expense")))
            .response(ResponseSpec::new("400", "Validation error").schema(schema_ref("ErrorResponse")));

        // Month and year only filter together; the handler ignores one without the other.
        api.member("get_expenses")
            .get("")
            .operation(
                OperationSpec::new("Get all expenses")
                    .description("Retrieve expenses with optional filters for month, year, and category"),
            )
            .query(ParamSpec::new("month", "number").description("Month (1-12)"))
            .query(ParamSpec::new("year", "number").description("Year (e.g., 2024)"))
            .query(ParamSpec::new("category", "string").description("Category ID"))
            .response(
                ResponseSpec::new("200", "List of expenses")
                    .schema(json!({ "type": "array", "items": schema_ref("Expense") })),
            );

        api.member("get_expense_by_id")
            .get("/{id}")
            .operation(
                OperationSpec::new("Get expense by ID")
                    .description("Retrieve a specific expense by its ID"),
            )
            .param(id_param())
            .response(ResponseSpec::new("200", "Expense details").schema(schema_ref("Expense")))
            .response(ResponseSpec::new("404", "Expense not found"));

        api.member("update_expense")
            .put("/{id}")
            .operation(OperationSpec::new("Update an expense").description("Update expense details by ID"))
            .param(id_param())
            .body(BodySpec::new("Updated expense data", expense_input(&[])))
            .response(ResponseSpec::new("200", "Expense updated successfully"))
            .response(ResponseSpec::new("404", "Expense not found"));

        api.member("delete_expense")
            .delete("/{id}")
            .operation(OperationSpec::new("Delete an expense").description("Delete an expense by ID"))
            .param(id_param())
            .response(ResponseSpec::new("200", "Expense deleted successfully"))
            .response(ResponseSpec::new("404", "Expense not found"));
    }
}
