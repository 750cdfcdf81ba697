#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use investment_report::models::{Company, Investment};
use investment_report::report::ReportService;
use investment_report::upstream::{
    CompanySource, ExportSink, InvestmentSource, UpstreamResponse, COMPANIES_SOURCE,
    INVESTMENTS_SOURCE,
};
use investment_report::{Error, Result};
use rust_decimal::Decimal;

/// Investments from the end-to-end example: one user split evenly across two companies.
pub fn example_investments() -> Vec<Investment> {
    vec![
        Investment::new("u1", "A", "B", "2024-01-01", Decimal::from(1000))
            .with_holding("c1", Decimal::new(5, 1))
            .with_holding("c2", Decimal::new(5, 1)),
    ]
}

pub fn example_companies() -> Vec<Company> {
    vec![Company::new("c1", "Acme"), Company::new("c2", "Globex")]
}

pub const EXAMPLE_CSV: &str = "User,First Name,Last Name,Date,Holding,Value\n\
                               u1,A,B,2024-01-01,Acme,500\n\
                               u1,A,B,2024-01-01,Globex,500";

#[derive(Debug, Default)]
pub struct MockInvestments {
    investments: Option<Vec<Investment>>,
    calls: AtomicUsize,
}

impl MockInvestments {
    pub fn returning(investments: Vec<Investment>) -> Self {
        Self {
            investments: Some(investments),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InvestmentSource for MockInvestments {
    async fn fetch_investments(&self) -> Result<Vec<Investment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.investments
            .clone()
            .ok_or_else(|| Error::source_unavailable(INVESTMENTS_SOURCE, "mock failure"))
    }

    async fn fetch_investment_raw(&self, _id: &str) -> Result<UpstreamResponse> {
        Err(Error::ProxyUpstreamFailed("not mocked".to_string()))
    }
}

#[derive(Debug, Default)]
pub struct MockCompanies {
    companies: Option<Vec<Company>>,
    hang: bool,
    calls: AtomicUsize,
}

impl MockCompanies {
    pub fn returning(companies: Vec<Company>) -> Self {
        Self {
            companies: Some(companies),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    /// Never resolves.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompanySource for MockCompanies {
    async fn fetch_companies(&self) -> Result<Vec<Company>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.companies
            .clone()
            .ok_or_else(|| Error::source_unavailable(COMPANIES_SOURCE, "mock failure"))
    }
}

/// Export sink that records every forwarded document.
#[derive(Debug, Default)]
pub struct RecordingExport {
    fail: bool,
    received: Mutex<Vec<String>>,
}

impl RecordingExport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExportSink for RecordingExport {
    async fn export(&self, csv: &str) -> Result<()> {
        self.received.lock().unwrap().push(csv.to_string());
        if self.fail {
            return Err(Error::ExportForwardingFailed("mock export failure".to_string()));
        }
        Ok(())
    }
}

pub fn service(
    investments: &Arc<MockInvestments>,
    companies: &Arc<MockCompanies>,
    export: &Arc<RecordingExport>,
) -> ReportService {
    ReportService::new(investments.clone(), companies.clone(), export.clone())
}
