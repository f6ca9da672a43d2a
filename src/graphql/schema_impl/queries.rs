use async_graphql::{Context, Json, Object, ID};

use crate::{
    app_state::AppState,
    graphql::helpers::{parse_id, to_graphql},
    models::{domain::WidgetKind, dto::response::WidgetSessionResponse},
    services::WidgetSessionService,
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn widget(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<WidgetSessionResponse> {
        let state = ctx.data::<AppState>()?;
        let id = to_graphql(parse_id(&id))?;
        to_graphql(state.widget_service.get_view(&id).await)
    }

    /// JSON Schema of the parameters a widget kind accepts.
    async fn parameter_schema(&self, kind: WidgetKind) -> async_graphql::Result<Json<serde_json::Value>> {
        to_graphql(WidgetSessionService::parameter_schema(kind)).map(Json)
    }
}
