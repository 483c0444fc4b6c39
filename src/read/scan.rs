use aws_sdk_dynamodb::{Client, error, operation};

/// scan operation
#[derive(Clone, Debug, Default, PartialEq)]
struct ScanInput {
    consistent_read: Option<bool>,
    table_name: String,
}

/// Scan operation.
///
/// Follows `LastEvaluatedKey` until the table is exhausted, so the returned
/// output holds every item of the table.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_user_api::read;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let scan = read::scan::Scan {
///     table_name: "users".to_string(),
///     ..Default::default()
/// };
/// scan.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan {
    /// Whether to use strongly consistent reads.
    pub consistent_read: Option<bool>,
    /// The name of the table to scan.
    pub table_name: String,
}

impl From<Scan> for ScanInput {
    fn from(scan: Scan) -> Self {
        Self {
            consistent_read: scan.consistent_read,
            table_name: scan.table_name,
        }
    }
}

impl Scan {
    /// Execute the scan operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::scan::ScanOutput, error::SdkError<operation::scan::ScanError>> {
        let scan: ScanInput = self.into();
        let mut paginator = client
            .scan()
            .set_consistent_read(scan.consistent_read)
            .table_name(scan.table_name)
            .into_paginator()
            .send();
        let (mut items, mut count, mut scanned_count) = (Vec::new(), 0, 0);
        while let Some(page) = paginator.next().await {
            let page = page?;
            if let Some(page_items) = page.items {
                items.extend(page_items);
            }
            count += page.count;
            scanned_count += page.scanned_count;
        }
        let output = operation::scan::ScanOutput::builder()
            .set_items(Some(items))
            .count(count)
            .scanned_count(scanned_count)
            .build();
        Ok(output)
    }
}
