//! Orchestrates report generation and delivery.

use std::fmt;
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::fields::{header, project, CompanyDirectory};
use super::render::render_csv;
use super::rows::expand_rows;
use crate::config::Config;
use crate::models::{Company, Investment};
use crate::upstream::{
    build_http_client, CompaniesServiceClient, CompanySource, ExportSink, InvestmentSource,
    InvestmentsServiceClient,
};
use crate::{Error, Result};

/// Progress of a single report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStage {
    FetchingSources,
    Transforming,
    ForwardingAndResponding,
    Done,
}

impl fmt::Display for ReportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportStage::FetchingSources => "fetching_sources",
            ReportStage::Transforming => "transforming",
            ReportStage::ForwardingAndResponding => "forwarding_and_responding",
            ReportStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// A rendered report plus the detached export forwarding task.
///
/// Dropping `export` does not cancel the forward.
#[derive(Debug)]
pub struct GeneratedReport {
    pub csv: String,
    pub export: JoinHandle<()>,
}

/// Coordinates source fetches, transformation, rendering, and export.
pub struct ReportService {
    investments: Arc<dyn InvestmentSource>,
    companies: Arc<dyn CompanySource>,
    export: Arc<dyn ExportSink>,
}

impl ReportService {
    pub fn new(
        investments: Arc<dyn InvestmentSource>,
        companies: Arc<dyn CompanySource>,
        export: Arc<dyn ExportSink>,
    ) -> Self {
        Self {
            investments,
            companies,
            export,
        }
    }

    /// Build HTTP-backed sources from configuration.
    ///
    /// The investments client doubles as the export sink.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_http_client(config.http.request_timeout)?;
        let investments = Arc::new(
            InvestmentsServiceClient::new(&config.investments_service_url)
                .with_client(client.clone()),
        );
        let companies = Arc::new(
            CompaniesServiceClient::new(&config.financial_companies_service_url)
                .with_client(client),
        );

        Ok(Self::new(investments.clone(), companies, investments))
    }

    pub fn investments(&self) -> &Arc<dyn InvestmentSource> {
        &self.investments
    }

    /// Fetch both sources concurrently and render the report.
    ///
    /// The first source failure aborts the report; nothing is rendered or
    /// forwarded.
    pub async fn generate(&self) -> Result<String> {
        tracing::debug!(stage = %ReportStage::FetchingSources, "report stage");

        let (investments, companies) = match tokio::try_join!(
            self.investments.fetch_investments(),
            self.companies.fetch_companies()
        ) {
            Ok(sources) => sources,
            Err(err) => {
                tracing::warn!(
                    upstream = err.failed_source().unwrap_or("unknown"),
                    error = %err,
                    "Report source unavailable"
                );
                return Err(err);
            }
        };

        tracing::debug!(
            stage = %ReportStage::Transforming,
            investments = investments.len(),
            companies = companies.len(),
            "report stage"
        );

        build_report(&investments, &companies).inspect_err(|err| {
            if let Error::CompanyNotFound(company_id) = err {
                tracing::warn!(company_id = %company_id, "Holding references unknown company");
            } else {
                tracing::warn!(error = %err, "Failed to build report");
            }
        })
    }

    /// Forward a rendered report to the export sink in the background.
    ///
    /// Failures are logged and never reported to the caller.
    pub fn forward(&self, csv: String) -> JoinHandle<()> {
        let export = Arc::clone(&self.export);
        tokio::spawn(async move {
            match export.export(&csv).await {
                Ok(()) => tracing::debug!(bytes = csv.len(), "Forwarded report to export"),
                Err(err) => tracing::warn!(error = %err, "Report export failed"),
            }
        })
    }

    /// Generate the report and start forwarding it without waiting.
    pub async fn run(&self) -> Result<GeneratedReport> {
        let csv = self.generate().await?;

        tracing::debug!(stage = %ReportStage::ForwardingAndResponding, "report stage");
        let export = self.forward(csv.clone());

        tracing::debug!(stage = %ReportStage::Done, "report stage");
        Ok(GeneratedReport { csv, export })
    }
}

/// Join, expand, project, and render in one pass.
pub fn build_report(investments: &[Investment], companies: &[Company]) -> Result<String> {
    let directory = CompanyDirectory::new(companies);
    let records = expand_rows(investments)
        .iter()
        .map(|row| project(row, &directory))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(rows = records.len(), "Built investment report");
    render_csv(&header(), &records)
}
