//! SiteWorks Admin CLI — inspect package tiers, validate feature
//! selections, preview navigation menus, and walk through demo sites.

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use siteworks_admin_console::{nav, ProviderOps, SiteSettingsOps};
use siteworks_bookings::{EventManager, ServicePackageManager};
use siteworks_catalog::{CategoryManager, ProductManager};
use siteworks_content::{BrandingManager, PageManager, Palette};
use siteworks_core::{AppConfig, SiteworksError, SiteworksResult};
use siteworks_features::{
    validate_and_normalize, FeatureId, NavItem, PackageTier, SiteFeatureSelection,
};
use siteworks_platform::tenancy::Site;
use siteworks_platform::{Role, RoleAssignments, SiteManager};

#[derive(Parser)]
#[command(name = "siteworks-admin")]
#[command(about = "SiteWorks Platform Administration Tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the feature catalog
    ListFeatures,

    /// List package tiers with their feature sets and count bounds
    ListTiers,

    /// Validate a feature selection against a package tier
    Validate {
        /// Package tier: basic, standard, premium, enterprise
        #[arg(short, long)]
        tier: String,

        /// Comma-separated feature list
        #[arg(short, long)]
        features: String,

        /// Comma-separated display order (defaults to the feature list)
        #[arg(short, long)]
        order: Option<String>,
    },

    /// Preview the navigation menu for a selection and viewer role
    Nav {
        /// Package tier: basic, standard, premium, enterprise
        #[arg(short, long)]
        tier: String,

        /// Comma-separated feature list
        #[arg(short, long)]
        features: String,

        /// Comma-separated display order (defaults to the feature list)
        #[arg(short, long)]
        order: Option<String>,

        /// Viewer role: super_admin, admin, editor
        #[arg(short, long, default_value = "admin")]
        role: String,
    },

    /// Demo site walkthrough — seeded, in-memory
    Sites {
        #[command(subcommand)]
        action: SitesAction,
    },
}

#[derive(Subcommand)]
enum SitesAction {
    /// List the demo sites
    List,

    /// Show one demo site in full (selection, menu, content)
    Show {
        /// Site slug, e.g. cedar-bakery
        slug: String,
    },

    /// Provision an extra site alongside the demo set
    Create {
        /// Site name
        name: String,

        /// Package tier (defaults to the configured platform default)
        #[arg(short, long)]
        tier: Option<String>,
    },

    /// Update a demo site's feature selection
    SetFeatures {
        /// Site slug
        slug: String,

        /// Comma-separated feature list
        #[arg(short, long)]
        features: String,

        /// Comma-separated display order (defaults to the feature list)
        #[arg(short, long)]
        order: Option<String>,
    },

    /// Migrate a demo site to another package tier
    SetTier {
        /// Site slug
        slug: String,

        /// Target tier
        tier: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "siteworks=warn".into()),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> SiteworksResult<()> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: failed to load config ({e}), using defaults");
        AppConfig::default()
    });

    let cli = Cli::parse();
    match cli.command {
        Commands::ListFeatures => cmd_list_features(),
        Commands::ListTiers => cmd_list_tiers(),
        Commands::Validate {
            tier,
            features,
            order,
        } => cmd_validate(tier, features, order)?,
        Commands::Nav {
            tier,
            features,
            order,
            role,
        } => cmd_nav(tier, features, order, role)?,
        Commands::Sites { action } => cmd_sites(&config, action)?,
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn parse_tier(s: &str) -> SiteworksResult<PackageTier> {
    PackageTier::parse(s).map_err(|e| SiteworksError::InvalidInput(e.to_string()))
}

fn parse_features(s: &str) -> SiteworksResult<Vec<FeatureId>> {
    let mut list = Vec::new();
    for name in s.split(',').filter(|n| !n.trim().is_empty()) {
        match FeatureId::parse(name) {
            Some(feature) => list.push(feature),
            None => {
                return Err(SiteworksError::InvalidInput(format!(
                    "unknown feature '{}'",
                    name.trim()
                )))
            }
        }
    }
    Ok(list)
}

fn parse_role(s: &str) -> SiteworksResult<Role> {
    Role::parse(s).ok_or_else(|| {
        SiteworksError::InvalidInput(format!(
            "unknown role '{s}' (expected super_admin, admin, or editor)"
        ))
    })
}

/// Display labels are a rendering concern, so they live here rather than in
/// the feature catalog.
fn label(feature: FeatureId) -> &'static str {
    match feature {
        FeatureId::Dashboard => "Dashboard",
        FeatureId::Products => "Products",
        FeatureId::Categories => "Categories",
        FeatureId::Events => "Events",
        FeatureId::EventServices => "Event Services",
        FeatureId::About => "About",
        FeatureId::Contact => "Contact",
        FeatureId::Hero => "Hero",
    }
}

fn nav_label(item: &NavItem) -> String {
    match item.feature {
        Some(feature) => label(feature).to_string(),
        None => {
            let mut chars = item.key.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog commands
// ---------------------------------------------------------------------------

fn cmd_list_features() {
    println!("Feature catalog:");
    println!();
    for &f in FeatureId::ALL {
        let note = if f == FeatureId::Dashboard {
            "always included, never counted"
        } else {
            ""
        };
        println!("  {:<16} {:<16} {}", f.as_str(), label(f), note);
    }
}

fn cmd_list_tiers() {
    println!("Package tiers:");
    println!();
    for &tier in PackageTier::ALL {
        let range = tier.count_range();
        let features: Vec<&str> = tier
            .allowed_features()
            .iter()
            .filter(|&&f| f != FeatureId::Dashboard)
            .map(|f| f.as_str())
            .collect();
        println!(
            "  {:<12} {}-{} features from: {}",
            tier.as_str(),
            range.min,
            range.max,
            features.join(", ")
        );
    }
}

fn build_selection(
    tier: &str,
    features: &str,
    order: Option<String>,
) -> SiteworksResult<SiteFeatureSelection> {
    let tier = parse_tier(tier)?;
    let features = parse_features(features)?;
    let order = match order {
        Some(o) => parse_features(&o)?,
        None => Vec::new(),
    };
    validate_and_normalize(tier, &features, &order)
        .map_err(|e| SiteworksError::InvalidInput(format!("selection invalid: {e}")))
}

fn cmd_validate(tier: String, features: String, order: Option<String>) -> SiteworksResult<()> {
    let selection = build_selection(&tier, &features, order)?;
    print_selection(&selection);
    Ok(())
}

fn cmd_nav(
    tier: String,
    features: String,
    order: Option<String>,
    role: String,
) -> SiteworksResult<()> {
    let selection = build_selection(&tier, &features, order)?;
    let role = parse_role(&role)?;

    println!("Menu for role `{role}`:");
    println!();
    for (idx, item) in nav::menu_for(&selection, role).iter().enumerate() {
        let gate = match item.feature {
            Some(feature) => format!("feature: {feature}"),
            None => "always visible".to_string(),
        };
        println!("  {:>2}. {:<16} ({gate})", idx + 1, nav_label(item));
    }
    Ok(())
}

fn print_selection(selection: &SiteFeatureSelection) {
    println!("Selection is VALID");
    println!();
    println!("  Tier:      {}", selection.tier());
    println!("  Features:  {} (+ dashboard)", selection.feature_count());
    let order: Vec<&str> = selection.order().iter().map(|f| f.as_str()).collect();
    println!("  Order:     {}", order.join(" > "));
}

// ---------------------------------------------------------------------------
// Demo site commands
// ---------------------------------------------------------------------------

struct DemoPlatform {
    sites: SiteManager,
    roles: RoleAssignments,
    super_admin: Uuid,
    products: ProductManager,
    categories: CategoryManager,
    events: EventManager,
    packages: ServicePackageManager,
    branding: BrandingManager,
    pages: PageManager,
}

/// Build the seeded in-memory platform the `sites` subcommands operate on.
fn demo_platform() -> SiteworksResult<DemoPlatform> {
    let sites = SiteManager::new();
    let roles = RoleAssignments::new();
    let super_admin = Uuid::new_v4();
    roles.grant_super_admin(super_admin);

    let seeded = sites.seed_demo_sites();

    let products = ProductManager::new();
    let categories = CategoryManager::new();
    let events = EventManager::new();
    let packages = ServicePackageManager::new();
    let branding = BrandingManager::new();
    let pages = PageManager::new();

    // Cedar Bakery: a small product catalog.
    if let Some(bakery) = seeded.iter().find(|s| s.slug == "cedar-bakery") {
        let breads = categories.create_category(bakery.id, "Breads", "Daily bakes", 0)?;
        for (name, price) in [("Sourdough Loaf", 850u64), ("Baguette", 450), ("Rye", 700)] {
            let p = products.create_product(bakery.id, name, "", price)?;
            products.assign_category(p.id, Some(breads.id))?;
        }
        pages.update_about(bakery.id, "Baking since 2004", "Stone ovens, slow dough.", None)?;
    }

    // Harbor Event Hall: an upcoming event and a contact page.
    if let Some(hall) = seeded.iter().find(|s| s.slug == "harbor-event-hall") {
        let starts = Utc::now() + Duration::days(21);
        let event = events.create_event(
            hall.id,
            "Winter Gala",
            "Seated dinner and live band",
            "Main Hall",
            starts,
            starts + Duration::hours(5),
            180,
        )?;
        events.publish(event.id)?;
        pages.update_contact(
            hall.id,
            "bookings@harborhall.example",
            Some("+1 555 0142".into()),
            None,
            Some("Mon-Fri 9-17".into()),
        )?;
    }

    // Lakeside Weddings: service packages and custom branding.
    if let Some(weddings) = seeded.iter().find(|s| s.slug == "lakeside-weddings") {
        packages.create_package(
            weddings.id,
            "Gold",
            "Full-service wedding",
            vec!["catering".into(), "decoration".into(), "photography".into()],
            850_000,
        )?;
        branding.set_palette(
            weddings.id,
            Palette {
                primary: "#2d4739".into(),
                secondary: "#7c9885".into(),
                accent: "#d4af37".into(),
                background: "#faf8f2".into(),
            },
        )?;
    }

    Ok(DemoPlatform {
        sites,
        roles,
        super_admin,
        products,
        categories,
        events,
        packages,
        branding,
        pages,
    })
}

fn find_site(platform: &DemoPlatform, slug: &str) -> SiteworksResult<Site> {
    platform
        .sites
        .list_sites()
        .into_iter()
        .find(|s| s.slug == slug)
        .ok_or_else(|| SiteworksError::NotFound(format!("site '{slug}'")))
}

fn cmd_sites(config: &AppConfig, action: SitesAction) -> SiteworksResult<()> {
    let platform = demo_platform()?;

    match action {
        SitesAction::List => sites_list(config, &platform),
        SitesAction::Show { slug } => sites_show(&platform, &slug)?,
        SitesAction::Create { name, tier } => sites_create(config, &platform, name, tier)?,
        SitesAction::SetFeatures {
            slug,
            features,
            order,
        } => sites_set_features(&platform, &slug, &features, order)?,
        SitesAction::SetTier { slug, tier } => sites_set_tier(&platform, &slug, &tier)?,
    }
    Ok(())
}

fn sites_list(config: &AppConfig, platform: &DemoPlatform) {
    let mut sites = platform.sites.list_sites();
    sites.sort_by(|a, b| a.name.cmp(&b.name));

    println!("=== {} sites ===", config.instance_name);
    println!();
    println!(
        "  {:<22} {:<22} {:<12} {:<10} Features",
        "Name", "Slug", "Tier", "Status"
    );
    println!("  {}", "-".repeat(80));
    for site in &sites {
        println!(
            "  {:<22} {:<22} {:<12} {:<10} {}",
            site.name,
            site.slug,
            site.package_tier.as_str(),
            format!("{:?}", site.status),
            site.selection.feature_count(),
        );
    }
    println!();
    println!("  Total: {} sites", sites.len());
}

fn sites_show(platform: &DemoPlatform, slug: &str) -> SiteworksResult<()> {
    let site = find_site(platform, slug)?;

    println!("=== {} ===", site.name);
    println!();
    println!("  Site ID:   {}", site.id);
    println!("  Slug:      {}", site.slug);
    println!("  Status:    {:?}", site.status);
    println!("  Tier:      {}", site.package_tier);
    println!("  Created:   {}", site.created_at.format("%Y-%m-%d"));

    println!();
    print_selection(&site.selection);

    println!();
    println!("  Admin menu:");
    for item in nav::menu_for(&site.selection, Role::Admin) {
        println!("    - {}", nav_label(&item));
    }

    let products = platform.products.list_for_site(site.id);
    if !products.is_empty() {
        println!();
        println!("  Products ({}):", products.len());
        for p in &products {
            let category = p
                .category_id
                .and_then(|id| platform.categories.get_category(id))
                .map(|c| c.name)
                .unwrap_or_else(|| "-".into());
            println!(
                "    {:<20} {:>8} {:<12} {}",
                p.name,
                format_cents(p.price_cents),
                category,
                if p.active { "" } else { "(inactive)" },
            );
        }
    }

    let events = platform.events.list_for_site(site.id);
    if !events.is_empty() {
        println!();
        println!("  Events ({}):", events.len());
        for e in &events {
            println!(
                "    {:<20} {:<12} {} ({} seats)",
                e.title,
                format!("{:?}", e.status),
                e.starts_at.format("%Y-%m-%d %H:%M"),
                e.capacity,
            );
        }
    }

    let packages = platform.packages.list_for_site(site.id);
    if !packages.is_empty() {
        println!();
        println!("  Service packages ({}):", packages.len());
        for pkg in &packages {
            println!(
                "    {:<12} {:>10} [{}]",
                pkg.name,
                format_cents(pkg.price_cents),
                pkg.services.join(", "),
            );
        }
    }

    let palette = platform.branding.palette_for(site.id);
    println!();
    println!(
        "  Palette:   primary {} / secondary {} / accent {} / background {}",
        palette.primary, palette.secondary, palette.accent, palette.background
    );

    if let Some(about) = platform.pages.about_for(site.id) {
        println!("  About:     {}", about.headline);
    }
    if let Some(contact) = platform.pages.contact_for(site.id) {
        println!("  Contact:   {}", contact.email);
    }
    Ok(())
}

fn sites_create(
    config: &AppConfig,
    platform: &DemoPlatform,
    name: String,
    tier: Option<String>,
) -> SiteworksResult<()> {
    if platform.sites.list_sites().len() as u32 >= config.platform.max_sites {
        return Err(SiteworksError::InvalidInput(format!(
            "deployment is at its site limit ({})",
            config.platform.max_sites
        )));
    }

    let tier = parse_tier(tier.as_deref().unwrap_or(&config.default_package_tier))?;
    let site = platform.sites.create_site(name, platform.super_admin, tier);

    println!("Site provisioned");
    println!();
    println!("  Site ID:   {}", site.id);
    println!("  Slug:      {}", site.slug);
    println!("  Tier:      {}", site.package_tier);
    println!();
    print_selection(&site.selection);
    Ok(())
}

fn sites_set_features(
    platform: &DemoPlatform,
    slug: &str,
    features: &str,
    order: Option<String>,
) -> SiteworksResult<()> {
    let site = find_site(platform, slug)?;
    let features = parse_features(features)?;
    let order = match order {
        Some(o) => parse_features(&o)?,
        None => Vec::new(),
    };

    let settings = SiteSettingsOps::new(&platform.sites);
    let selection = settings
        .update_site_features(site.id, None, &features, &order)
        .map_err(|e| SiteworksError::InvalidInput(format!("update rejected: {e}")))?;

    println!("Features updated for {}", site.name);
    println!();
    print_selection(&selection);
    Ok(())
}

fn sites_set_tier(platform: &DemoPlatform, slug: &str, tier: &str) -> SiteworksResult<()> {
    let site = find_site(platform, slug)?;
    let tier = parse_tier(tier)?;

    let provider = ProviderOps::new(&platform.sites, &platform.roles);
    let migration = provider.assign_tier(platform.super_admin, site.id, tier)?;

    println!(
        "Migrated {} from {} to {}",
        site.name, migration.previous_tier, migration.new_tier
    );
    if !migration.dropped_features.is_empty() {
        let dropped: Vec<&str> = migration
            .dropped_features
            .iter()
            .map(|f| f.as_str())
            .collect();
        println!("  Dropped:  {}", dropped.join(", "));
    }
    if !migration.added_features.is_empty() {
        let added: Vec<&str> = migration
            .added_features
            .iter()
            .map(|f| f.as_str())
            .collect();
        println!("  Added:    {}", added.join(", "));
    }
    println!();
    print_selection(&migration.selection);
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn format_cents(cents: u64) -> String {
    let dollars = cents / 100;
    let remainder = cents % 100;
    if dollars >= 1_000 {
        format!(
            "${},{:03}.{:02}",
            dollars / 1_000,
            dollars % 1_000,
            remainder
        )
    } else {
        format!("${dollars}.{remainder:02}")
    }
}
