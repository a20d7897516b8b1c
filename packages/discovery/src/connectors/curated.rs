//! Embedded fallback datasets.
//!
//! Every connector degrades to a curated list of real companies when its
//! upstream API is unreachable or unconfigured, so discovery always has
//! something to show. Sector and stage values here are already canonical.

use crate::traits::connector::SourceId;
use crate::types::candidate::Candidate;

// (name, tagline, sector, stage, location, batch, website)
const YC: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
    ("Stripe", "Financial infrastructure for the internet", "FinTech", "Growth/Late Stage", "San Francisco, CA", "S09", "https://stripe.com"),
    ("Airbnb", "Book unique homes and experiences", "Marketplace", "Growth/Late Stage", "San Francisco, CA", "W09", "https://airbnb.com"),
    ("OpenAI", "AI research and deployment company", "AI/ML", "Growth/Late Stage", "San Francisco, CA", "S15", "https://openai.com"),
    ("Coinbase", "Buy, sell, and store cryptocurrency", "Blockchain/Web3", "Growth/Late Stage", "San Francisco, CA", "S12", "https://coinbase.com"),
    ("DoorDash", "Delivery for every neighborhood", "Marketplace", "Growth/Late Stage", "San Francisco, CA", "S13", "https://doordash.com"),
    ("Instacart", "Grocery delivery from local stores", "E-commerce", "Growth/Late Stage", "San Francisco, CA", "S12", "https://instacart.com"),
    ("Brex", "Corporate cards and spend management", "FinTech", "Series C+", "San Francisco, CA", "W17", "https://brex.com"),
    ("Scale AI", "Accelerate AI development with quality data", "AI/ML", "Series C+", "San Francisco, CA", "S16", "https://scale.com"),
    ("Retool", "Build internal tools remarkably fast", "Developer Tools", "Series B", "San Francisco, CA", "W17", "https://retool.com"),
    ("Faire", "Wholesale marketplace for retailers", "Marketplace", "Series C+", "San Francisco, CA", "W17", "https://faire.com"),
    ("Gusto", "All-in-one people platform", "B2B SaaS", "Series C+", "San Francisco, CA", "W12", "https://gusto.com"),
    ("Figma", "Collaborative interface design tool", "Developer Tools", "Growth/Late Stage", "San Francisco, CA", "S12", "https://figma.com"),
    ("Flexport", "Modern freight forwarding", "Enterprise Software", "Series C+", "San Francisco, CA", "W14", "https://flexport.com"),
    ("Checkr", "Modern background check platform", "B2B SaaS", "Series C+", "San Francisco, CA", "S14", "https://checkr.com"),
    ("Ginkgo Bioworks", "The organism company", "DeepTech", "Growth/Late Stage", "Boston, MA", "S14", "https://ginkgobioworks.com"),
    ("PagerDuty", "Digital operations management", "Enterprise Software", "Growth/Late Stage", "San Francisco, CA", "S10", "https://pagerduty.com"),
    ("Zapier", "Connect your apps and automate", "B2B SaaS", "Growth/Late Stage", "San Francisco, CA", "S12", "https://zapier.com"),
    ("Segment", "Customer data platform", "B2B SaaS", "Growth/Late Stage", "San Francisco, CA", "S11", "https://segment.com"),
    ("Rippling", "Employee management platform", "B2B SaaS", "Series C+", "San Francisco, CA", "W17", "https://rippling.com"),
    ("Weave", "Communication for small business", "B2B SaaS", "Series C+", "Lehi, UT", "W14", "https://getweave.com"),
];

// (name, tagline, sector, stage, location, website)
const CRUNCHBASE: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("Anthropic", "AI safety company building reliable AI", "AI/ML", "Series C+", "San Francisco, CA", "https://anthropic.com"),
    ("Databricks", "Unified analytics platform", "Enterprise Software", "Series C+", "San Francisco, CA", "https://databricks.com"),
    ("Canva", "Online design and publishing platform", "B2B SaaS", "Growth/Late Stage", "Sydney, Australia", "https://canva.com"),
    ("Notion", "All-in-one workspace for notes and docs", "B2B SaaS", "Series C+", "San Francisco, CA", "https://notion.so"),
    ("Plaid", "Financial data network", "FinTech", "Series C+", "San Francisco, CA", "https://plaid.com"),
    ("Ramp", "Corporate cards and spend management", "FinTech", "Series C+", "New York, NY", "https://ramp.com"),
    ("Vercel", "Platform for frontend developers", "Developer Tools", "Series C+", "San Francisco, CA", "https://vercel.com"),
    ("Linear", "Issue tracking for modern teams", "Developer Tools", "Series B", "San Francisco, CA", "https://linear.app"),
    ("Airtable", "Low-code platform for applications", "B2B SaaS", "Series C+", "San Francisco, CA", "https://airtable.com"),
    ("Figma", "Collaborative interface design", "Developer Tools", "Growth/Late Stage", "San Francisco, CA", "https://figma.com"),
];

// (name, tagline, sector, stage, location, website)
const ANGELLIST: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("Mercury", "Banking for startups", "FinTech", "Series B", "San Francisco, CA", "https://mercury.com"),
    ("Deel", "Global payroll and compliance", "B2B SaaS", "Series C+", "San Francisco, CA", "https://deel.com"),
    ("Remote", "Global HR platform", "B2B SaaS", "Series C+", "San Francisco, CA", "https://remote.com"),
    ("Loom", "Video messaging for work", "B2B SaaS", "Growth/Late Stage", "San Francisco, CA", "https://loom.com"),
    ("Lattice", "People management platform", "B2B SaaS", "Series C+", "San Francisco, CA", "https://lattice.com"),
    ("Miro", "Visual collaboration platform", "B2B SaaS", "Series C+", "San Francisco, CA", "https://miro.com"),
    ("Synthesia", "AI video generation platform", "AI/ML", "Series B", "London, UK", "https://synthesia.io"),
    ("Jasper", "AI content generation", "AI/ML", "Series A", "Austin, TX", "https://jasper.ai"),
    ("Runway", "AI tools for video creation", "AI/ML", "Series C+", "New York, NY", "https://runwayml.com"),
    ("Snyk", "Developer security platform", "Cybersecurity", "Series C+", "Boston, MA", "https://snyk.io"),
];

// (cin, name, tagline, sector, stage, location, website)
const REGISTRY: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
    ("U74999KA2016PTC093609", "Razorpay", "Payment gateway and banking solutions", "FinTech", "Series C+", "Bangalore, India", "https://razorpay.com"),
    ("U65999MH2010PTC209419", "Paytm", "Digital payments and financial services", "FinTech", "Growth/Late Stage", "Noida, India", "https://paytm.com"),
    ("U74140DL2015PTC276919", "PhonePe", "UPI-based payment app", "FinTech", "Growth/Late Stage", "Bangalore, India", "https://phonepe.com"),
    ("U67190MH2016PTC279785", "CRED", "Credit card bill payments and rewards", "FinTech", "Series C+", "Bangalore, India", "https://cred.club"),
    ("U65993KA2013PTC069805", "BharatPe", "Payment solutions for merchants", "FinTech", "Series C+", "Delhi, India", "https://bharatpe.com"),
    ("U51909KA2012PTC066107", "Flipkart", "India's leading e-commerce marketplace", "E-commerce", "Growth/Late Stage", "Bangalore, India", "https://flipkart.com"),
    ("U52100KA2018PTC116662", "Meesho", "Social commerce platform", "E-commerce", "Series C+", "Bangalore, India", "https://meesho.com"),
    ("U74900HR2013PTC049809", "Nykaa", "Beauty and fashion e-commerce", "E-commerce", "Growth/Late Stage", "Mumbai, India", "https://nykaa.com"),
    ("U52190UP2015PTC074641", "BigBasket", "Online grocery delivery", "E-commerce", "Growth/Late Stage", "Bangalore, India", "https://bigbasket.com"),
    ("U72900KA2011PTC059936", "Freshworks", "Customer engagement software", "B2B SaaS", "Growth/Late Stage", "Chennai, India", "https://freshworks.com"),
    ("U72200KA2010PTC053850", "Zoho", "Business software suite", "B2B SaaS", "Growth/Late Stage", "Chennai, India", "https://zoho.com"),
    ("U74999MH2015PTC264713", "Postman", "API development platform", "Developer Tools", "Series C+", "San Francisco, CA (India origin)", "https://postman.com"),
    ("U72400KA2013PTC116215", "Chargebee", "Subscription billing platform", "B2B SaaS", "Series C+", "Chennai, India", "https://chargebee.com"),
    ("U80302KA2011PTC092551", "BYJU'S", "Learning app for students", "EdTech", "Growth/Late Stage", "Bangalore, India", "https://byjus.com"),
    ("U80903RJ2017PTC057573", "Unacademy", "Online learning platform", "EdTech", "Series C+", "Bangalore, India", "https://unacademy.com"),
    ("U80904MH2015PTC269239", "upGrad", "Higher education platform", "EdTech", "Series C+", "Mumbai, India", "https://upgrad.com"),
    ("U80903KA2019PTC125007", "PhysicsWallah", "Affordable online education", "EdTech", "Series A", "Noida, India", "https://physicswallah.live"),
    ("U74999MH2015PTC262940", "PharmEasy", "Online pharmacy and healthcare", "HealthTech", "Series C+", "Mumbai, India", "https://pharmeasy.in"),
    ("U85100KA2014PTC073062", "Practo", "Healthcare platform", "HealthTech", "Series C+", "Bangalore, India", "https://practo.com"),
    ("U51909MH2015PTC269385", "1mg", "Health super app", "HealthTech", "Growth/Late Stage", "Gurugram, India", "https://1mg.com"),
    ("U60200KA2010PTC053679", "Ola", "Ride-hailing and mobility platform", "Mobility", "Growth/Late Stage", "Bangalore, India", "https://olacabs.com"),
    ("U34100KA2013PTC097299", "Ola Electric", "Electric vehicle manufacturer", "Climate Tech", "Series C+", "Bangalore, India", "https://olaelectric.com"),
    ("U35100DL2017PTC324448", "Ather Energy", "Electric scooter manufacturer", "Climate Tech", "Series C+", "Bangalore, India", "https://atherenergy.com"),
    ("U72900DL2019PTC349962", "Yellow.ai", "AI-powered customer engagement", "AI/ML", "Series C+", "Bangalore, India", "https://yellow.ai"),
    ("U72900KA2017PTC106358", "Observe.AI", "AI for contact centers", "AI/ML", "Series C+", "San Francisco, CA (India origin)", "https://observe.ai"),
    ("U55101KA2010PTC054958", "Swiggy", "Food delivery and quick commerce", "Marketplace", "Growth/Late Stage", "Bangalore, India", "https://swiggy.com"),
    ("U74999HR2008PTC037068", "Zomato", "Food delivery and restaurant discovery", "Marketplace", "Growth/Late Stage", "Gurugram, India", "https://zomato.com"),
    ("U72900KA2014PTC073551", "Dream11", "Fantasy sports platform", "Gaming", "Growth/Late Stage", "Mumbai, India", "https://dream11.com"),
    ("U72900KA2017PTC110199", "MPL (Mobile Premier League)", "Mobile gaming platform", "Gaming", "Series C+", "Bangalore, India", "https://mpl.live"),
];

/// Curated Y Combinator alumni.
pub fn yc_companies() -> Vec<Candidate> {
    YC.iter()
        .map(|&(name, tagline, sector, stage, location, batch, website)| {
            Candidate::new(name, sector, stage, SourceId::Yc)
                .with_tagline(tagline)
                .with_location(location)
                .with_website(website)
                .with_batch(batch)
        })
        .collect()
}

/// Curated companies as listed on Crunchbase.
pub fn crunchbase_companies() -> Vec<Candidate> {
    CRUNCHBASE
        .iter()
        .map(|&(name, tagline, sector, stage, location, website)| {
            Candidate::new(name, sector, stage, SourceId::Crunchbase)
                .with_tagline(tagline)
                .with_location(location)
                .with_website(website)
        })
        .collect()
}

/// Curated companies from AngelList public pages.
pub fn angellist_companies() -> Vec<Candidate> {
    ANGELLIST
        .iter()
        .map(|&(name, tagline, sector, stage, location, website)| {
            Candidate::new(name, sector, stage, SourceId::AngelList)
                .with_tagline(tagline)
                .with_location(location)
                .with_website(website)
        })
        .collect()
}

/// Curated Indian startups with their corporate registration numbers.
///
/// The registration number doubles as the dedup identifier and as the
/// lookup key for the live registry API.
pub fn registry_companies() -> Vec<Candidate> {
    REGISTRY
        .iter()
        .map(|&(cin, name, tagline, sector, stage, location, website)| {
            Candidate::new(name, sector, stage, SourceId::Registry)
                .with_tagline(tagline)
                .with_location(location)
                .with_website(website)
                .with_source_ref(cin)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datasets_are_non_empty_and_tagged_with_their_source() {
        assert!(yc_companies().iter().all(|c| c.source == SourceId::Yc));
        assert!(crunchbase_companies()
            .iter()
            .all(|c| c.source == SourceId::Crunchbase));
        assert!(angellist_companies()
            .iter()
            .all(|c| c.source == SourceId::AngelList));
        assert!(registry_companies()
            .iter()
            .all(|c| c.source == SourceId::Registry));
    }

    #[test]
    fn yc_companies_carry_batches() {
        assert!(yc_companies().iter().all(|c| c.batch.is_some()));
        assert!(yc_companies().len() >= 20);
    }

    #[test]
    fn registry_companies_carry_registration_numbers() {
        let companies = registry_companies();
        assert!(companies.iter().all(|c| c.source_ref.is_some()));

        // registration numbers are unique
        let mut keys: Vec<_> = companies.iter().map(|c| c.dedup_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), companies.len());
    }
}
