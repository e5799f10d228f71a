use tally_core::prelude::*;
use tally_openapi::schema_ref;

pub struct DashboardController;

impl Controller for DashboardController {
    fn declare(api: &mut Annotations<'_, Self>) {
        api.controller("/dashboard", ["Dashboard"]);

        api.member("get_monthly_summary")
            .get("/summary")
            .operation(OperationSpec::new("Get monthly summary").description(
                "Get comprehensive monthly expense summary including totals, category breakdown, and daily spending",
            ))
            .query(
                ParamSpec::new("month", "number")
                    .required(true)
                    .description("Month (1-12)"),
            )
            .query(
                ParamSpec::new("year", "number")
                    .required(true)
                    .description("Year (e.g., 2024)"),
            )
            .response(ResponseSpec::new("200", "Monthly summary data").schema(schema_ref("MonthlySummary")))
            .response(ResponseSpec::new("400", "Invalid month or year").schema(schema_ref("ErrorResponse")));
    }
}
