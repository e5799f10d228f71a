use serde_json::json;
use tally_core::prelude::*;

pub struct HealthController;

impl Controller for HealthController {
    fn declare(api: &mut Annotations<'_, Self>) {
        api.controller("/health", ["System"]);

        api.member("health_check")
            .get("")
            .operation(OperationSpec::new("Health check").description("Check if the API is running"))
            .response(ResponseSpec::new("200", "Service is healthy").schema(json!({
                "type": "object",
                "properties": {
                    "status": { "type": "string" },
                    "timestamp": { "type": "string" },
                    "uptime": { "type": "number" }
                }
            })));
    }
}
