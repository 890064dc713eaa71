use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use curio::config::Config;
use curio::handlers::{
    CategoryResponse, CollectionResponse, CreateCollectionRequest, CreateItemRequest, ItemResponse,
    PhotoResponse, PrimaryPhotoResponse, UpdateCollectionRequest, UpdateItemRequest,
    UploadPhotosResponse,
};
use curio::state::AppState;
use curio::{build_router, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::category::list_categories,
        handlers::collection::list_collections,
        handlers::collection::create_collection,
        handlers::collection::get_collection,
        handlers::collection::update_collection,
        handlers::collection::delete_collection,
        handlers::item::list_items,
        handlers::item::create_item,
        handlers::item::get_item,
        handlers::item::update_item,
        handlers::item::delete_item,
        handlers::photo::list_photos,
        handlers::photo::add_photos,
        handlers::photo::set_primary_photo,
        handlers::photo::delete_photo,
    ),
    components(schemas(
        CategoryResponse,
        CreateCollectionRequest,
        UpdateCollectionRequest,
        CollectionResponse,
        CreateItemRequest,
        UpdateItemRequest,
        ItemResponse,
        PhotoResponse,
        UploadPhotosResponse,
        PrimaryPhotoResponse,
    )),
    tags(
        (name = "Categories", description = "Collection category reference data"),
        (name = "Collections", description = "Collection management endpoints"),
        (name = "Items", description = "Item management endpoints"),
        (name = "Photos", description = "Item photo upload and lifecycle endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let addr = config.server_addr();

    // Initialize application state (database + upload root)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config).await?;
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
