use serde_json::json;
use tally_openapi::SchemaRegistry;

use crate::models::{Category, Expense, MonthlySummary};

/// Register the schemas shared across controllers.
pub fn register_shared_schemas(registry: &mut SchemaRegistry) {
    registry.load_schemas([(
        "ErrorResponse",
        json!({
            "type": "object",
            "properties": {
                "success": { "type": "boolean" },
                "message": { "type": "string" },
                "code": { "type": "string" }
            }
        }),
    )]);

    registry.register_type::<Expense>();
    registry.register_type::<Category>();
    registry.register_type::<MonthlySummary>();
}
