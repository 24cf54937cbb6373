use futures::future::try_join_all;
use huegrid_core::{AggregationError, ColorCollection, HslQuery, HueQuery, Percent, SwatchParams};
use std::time::Instant;
use tracing::{debug, error, info};

use crate::fetcher::{ColorFetcher, FetchResponse};
use crate::response::parse_record;

/// Fans out one lookup per hue degree and folds the answers into a [`ColorCollection`].
#[derive(Debug)]
pub struct ColorAggregator<F> {
    fetcher: F,
}

impl<F: ColorFetcher> ColorAggregator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn aggregate(
        &self,
        saturation: Percent,
        lightness: Percent,
    ) -> Result<ColorCollection, AggregationError> {
        self.aggregate_params(SwatchParams::new(saturation, lightness))
            .await
    }

    /// All-or-nothing: a transport error, a non-success status or an
    /// unparseable body on any of the 360 lookups fails the whole batch.
    pub async fn aggregate_params(
        &self,
        params: SwatchParams,
    ) -> Result<ColorCollection, AggregationError> {
        let start = Instant::now();
        let result = self.run(params).await;
        match &result {
            Ok(collection) => info!(
                "Aggregated {} distinct colors at s={} l={} in {:?}",
                collection.len(),
                params.saturation,
                params.lightness,
                start.elapsed()
            ),
            Err(e) => error!(
                "Aggregation at s={} l={} failed: {}",
                params.saturation, params.lightness, e
            ),
        }
        result
    }

    async fn run(&self, params: SwatchParams) -> Result<ColorCollection, AggregationError> {
        let queries: Vec<HslQuery> = HueQuery::full_range().map(|h| params.query(h)).collect();
        debug!("Dispatching {} hue lookups", queries.len());

        // try_join_all keeps request order, so arrival order never decides
        // which record becomes canonical for a name.
        let responses = try_join_all(queries.iter().map(|q| self.lookup(*q))).await?;

        let failed: Vec<&(HslQuery, FetchResponse)> = responses
            .iter()
            .filter(|(_, response)| !response.is_success())
            .collect();
        if let Some((query, first)) = failed.first() {
            debug!(
                "Lookup for hue {} returned status {}",
                query.hue.degrees(),
                first.status
            );
            return Err(AggregationError::PartialBatch {
                failed: failed.len(),
                total: responses.len(),
                status: first.status,
            });
        }

        let records = responses
            .iter()
            .map(|(query, response)| {
                parse_record(&response.body).map_err(|e| AggregationError::Parse {
                    hue: query.hue.degrees(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Parsed {} records, deduplicating by name", records.len());

        Ok(ColorCollection::from_batch(records))
    }

    async fn lookup(
        &self,
        query: HslQuery,
    ) -> Result<(HslQuery, FetchResponse), AggregationError> {
        self.fetcher
            .fetch(query)
            .await
            .map(|response| (query, response))
            .map_err(|e| AggregationError::Network {
                hue: query.hue.degrees(),
                message: e.to_string(),
            })
    }
}
