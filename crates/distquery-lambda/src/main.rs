//! AWS Lambda function for driving distance queries.

use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    distquery_lambda::run().await
}
