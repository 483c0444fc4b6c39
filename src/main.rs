use dynamodb_user_api::{config::Config, handlers, user::dynamo::DynamoUserStore};

use lambda_http::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::tracing::init_default_subscriber();

    let config = Config::from_env()?;
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_dynamodb::Client::new(&sdk_config);
    let store = DynamoUserStore::from_config(client, &config);
    tracing::info!(
        table_name = store.table_name(),
        allow_overwrite = config.allow_overwrite,
        "user api ready"
    );

    run(service_fn(|request| handlers::handle_request(&store, request))).await
}
