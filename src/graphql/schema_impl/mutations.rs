use async_graphql::{Context, Object, ID};

use crate::{
    app_state::AppState,
    graphql::helpers::{parse_id, to_graphql},
    models::{
        domain::{MultipleChoiceParams, SortingParams},
        dto::{
            request::{MoveItemRequest, SelectOptionRequest},
            response::{SubmissionResponse, WidgetSessionResponse},
        },
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_sorting_widget(
        &self,
        ctx: &Context<'_>,
        input: SortingParams,
    ) -> async_graphql::Result<WidgetSessionResponse> {
        let state = ctx.data::<AppState>()?;
        to_graphql(state.widget_service.create_sorting(input).await)
    }

    async fn create_multiple_choice_widget(
        &self,
        ctx: &Context<'_>,
        input: MultipleChoiceParams,
    ) -> async_graphql::Result<WidgetSessionResponse> {
        let state = ctx.data::<AppState>()?;
        to_graphql(state.widget_service.create_multiple_choice(input).await)
    }

    async fn update_sorting_params(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: SortingParams,
    ) -> async_graphql::Result<WidgetSessionResponse> {
        let state = ctx.data::<AppState>()?;
        let id = to_graphql(parse_id(&id))?;
        to_graphql(state.widget_service.update_sorting_params(&id, input).await)
    }

    async fn move_item(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: MoveItemRequest,
    ) -> async_graphql::Result<WidgetSessionResponse> {
        let state = ctx.data::<AppState>()?;
        let id = to_graphql(parse_id(&id))?;
        to_graphql(state.widget_service.move_item(&id, input.into()).await)
    }

    async fn select_option(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: SelectOptionRequest,
    ) -> async_graphql::Result<WidgetSessionResponse> {
        let state = ctx.data::<AppState>()?;
        let id = to_graphql(parse_id(&id))?;
        to_graphql(state.widget_service.select_option(&id, input.selected).await)
    }

    async fn submit_widget(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<SubmissionResponse> {
        let state = ctx.data::<AppState>()?;
        let id = to_graphql(parse_id(&id))?;
        to_graphql(state.widget_service.submit(&id).await)
    }
}
