use std::sync::Arc;

use clap::Args;

use gramstay::auth::{Principal, SessionHandle};
use gramstay::error::AppError;
use gramstay::listings::domain::{Listing, ListingStatus, PropertyType};
use gramstay::listings::filter::FilterConfig;
use gramstay::listings::repository::ListingRepository;
use gramstay::submission::{
    StagedImage, SubmissionCommitter, SubmissionError, SubmissionSession, SubmitOutcome,
};

use crate::infra::{InMemoryListingRepository, InMemoryPreviewAllocator, InMemoryStorageGateway};
use crate::seed::seed_listings;

#[derive(Args, Debug, Default)]
pub(crate) struct SearchArgs {
    /// Free-text query matched against listing location and title
    #[arg(long, default_value = "")]
    pub(crate) query: String,
    /// Lower price bound (inclusive, rupees per month)
    #[arg(long)]
    pub(crate) min_price: Option<u32>,
    /// Upper price bound (inclusive, rupees per month)
    #[arg(long)]
    pub(crate) max_price: Option<u32>,
    /// Only show listings that passed verification
    #[arg(long)]
    pub(crate) verified_only: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the discovery search after the submission walkthrough
    #[arg(long)]
    pub(crate) skip_search: bool,
}

impl SearchArgs {
    fn filter(&self) -> FilterConfig {
        FilterConfig {
            text_query: self.query.clone(),
            min_price: self.min_price.unwrap_or(0),
            max_price: self.max_price.unwrap_or(u32::MAX),
            verified_only: self.verified_only,
        }
    }
}

pub(crate) async fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let repository = InMemoryListingRepository::seeded(seed_listings());
    let rows = repository.fetch_all().await?;
    render_search(&args.filter(), &rows);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Gramstay submission demo");

    let repository = Arc::new(InMemoryListingRepository::seeded(seed_listings()));
    let storage = Arc::new(InMemoryStorageGateway::new(
        "https://storage.gramstay.local/room_images",
    ));
    let previews = Arc::new(InMemoryPreviewAllocator::default());
    let session_handle = Arc::new(SessionHandle::restore(Some(Principal {
        id: "demo-owner".to_string(),
        email: "demo-owner@gramstay.local".to_string(),
    })));

    let committer = SubmissionCommitter::new(storage, repository.clone());
    let mut session = SubmissionSession::new(committer, session_handle, previews);

    println!("- Step 1: basic details");
    session.update_form(|form| {
        form.title = "Traditional Rural Cottage".to_string();
        form.property_type = Some(PropertyType::House);
        form.location = "Palakkad, Kerala".to_string();
        form.price = "7500".to_string();
        form.description = "Traditional cottage surrounded by farmland.".to_string();
    })?;
    session.advance()?;

    println!("- Step 2: photos and amenities");
    session.stage_images(vec![StagedImage {
        file_name: "cottage-front.jpg".to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    }]);
    session.update_form(|form| {
        for amenity in ["Garden", "Kitchenette", "WiFi"] {
            form.amenities.insert(amenity.to_string());
        }
        form.status = ListingStatus::Available;
    })?;
    session.advance()?;

    println!("- Step 3: owner verification");
    session.update_form(|form| {
        form.owner_name = "Lakshmi Nair".to_string();
        form.owner_phone = "7654321890".to_string();
        form.authorization_acknowledged = true;
    })?;

    match session.submit().await {
        Ok(SubmitOutcome::Completed(receipt)) => {
            println!(
                "- Submitted: {} ({}) -> navigate {:?}",
                receipt.listing.id.0, receipt.listing.title, receipt.navigate
            );
            println!("  Pending verification: {}", !receipt.listing.is_verified);
            println!("  Cover image: {}", receipt.listing.image_url);
        }
        Ok(SubmitOutcome::Ignored) => {
            println!("- Submission already in flight; nothing sent");
        }
        Err(SubmissionError::Unauthorized) => {
            println!("- Submission refused: sign in first");
        }
        Err(err) => {
            println!("- Submission failed: {err}");
        }
    }

    if args.skip_search {
        return Ok(());
    }

    println!("\nDiscovery search: kerala");
    let rows = repository.fetch_all().await?;
    let filter = FilterConfig {
        text_query: "kerala".to_string(),
        ..FilterConfig::default()
    };
    render_search(&filter, &rows);

    Ok(())
}

fn render_search(filter: &FilterConfig, rows: &[Listing]) {
    let matches = filter.apply(rows);
    if matches.is_empty() {
        println!("no listings matched");
        return;
    }

    println!("{} listing(s) matched", matches.len());
    for listing in matches {
        let card = listing.card();
        let badge = if card.is_verified { "verified" } else { "unverified" };
        println!(
            "- {} | {} | {} | Rs {}/month | rating {:.1} | {}",
            card.id.0, card.title, card.location, card.price, card.rating, badge
        );
    }
}
