//! Built-in catalog served when the content store is unavailable.
//!
//! Same shape as store data, never merged with it.

use la_fleur_core::{Block, Category, Price, Product, ProductId, Slug};

struct Seed {
    slug: &'static str,
    title: &'static str,
    price: u32,
    short_description: &'static str,
    category: &'static str,
    featured: bool,
    tags: &'static [&'static str],
    description: &'static [&'static str],
}

const SEEDS: &[Seed] = &[
    Seed {
        slug: "garden-bliss-bouquet",
        title: "Garden Bliss Bouquet",
        price: 125,
        short_description: "A lush mix of peonies, garden roses, and eucalyptus",
        category: "bouquets",
        featured: true,
        tags: &["peonies", "roses", "eucalyptus"],
        description: &[
            "A stunning bouquet bursting with the romance of garden roses, the luxury of \
             peonies, and the freshness of eucalyptus. Hand-tied and finished with our \
             signature ribbon, this arrangement is perfect for any occasion.",
            "Sourced fresh from our trusted growers in the Netherlands and Ecuador, every \
             bloom is selected for peak freshness and beauty.",
        ],
    },
    Seed {
        slug: "cote-dazur-flower-box",
        title: "Côte d'Azur Flower Box",
        price: 185,
        short_description: "French roses and delphiniums in an elegant hat box",
        category: "flowers-in-a-box",
        featured: true,
        tags: &["roses", "delphiniums", "box"],
        description: &[
            "Inspired by the colours of the French Riviera, this luxurious flower box \
             combines premium French roses with delicate delphiniums in a curated palette \
             of soft blues, blushes, and creams.",
            "Presented in our signature keepsake hat box, a gift that keeps giving long \
             after the flowers bloom.",
        ],
    },
    Seed {
        slug: "rose-petal-romance",
        title: "Rose Petal Romance",
        price: 95,
        short_description: "50 premium roses in soft blush and ivory tones",
        category: "bouquets",
        featured: true,
        tags: &["roses"],
        description: &[
            "Fifty premium roses hand-selected in the most romantic soft blush and ivory \
             hues. This classic arrangement speaks the language of love and elegance.",
            "Ideal for anniversaries, Valentine's Day, or any moment that deserves to feel \
             extraordinary. Wrapped in our signature craft paper with a satin ribbon.",
        ],
    },
    Seed {
        slug: "wildflower-meadow",
        title: "Wildflower Meadow",
        price: 80,
        short_description: "A free-spirited mix of seasonal wildflowers",
        category: "bouquets",
        featured: false,
        tags: &["wildflowers", "seasonal"],
        description: &[
            "A free-spirited, effortlessly beautiful bouquet brimming with the best \
             seasonal wildflowers, arranged in a loose, garden-picked style.",
        ],
    },
    Seed {
        slug: "flower-box-roses-hydrangeas",
        title: "Flower Box with Roses and Hydrangeas",
        price: 150,
        short_description: "Garden roses and fluffy hydrangeas in a keepsake box",
        category: "flowers-in-a-box",
        featured: false,
        tags: &["roses", "hydrangeas", "box"],
        description: &[
            "Soft hydrangea clouds and full garden roses arranged in one of our keepsake \
             boxes, ready to gift with no vase required.",
        ],
    },
    Seed {
        slug: "teddy-bear-roses-basket",
        title: "Teddy Bear & Roses Basket",
        price: 140,
        short_description: "A soft teddy bear paired with 12 premium red roses",
        category: "baskets",
        featured: true,
        tags: &["gift", "roses", "teddy"],
        description: &[
            "The ultimate gift: a soft, huggable teddy bear paired with a dozen \
             long-stemmed premium Ecuadorian red roses. Perfect for birthdays, \
             anniversaries, or just because.",
        ],
    },
    Seed {
        slug: "sunrise-tulip-bouquet",
        title: "Sunrise Tulip Bouquet",
        price: 70,
        short_description: "Cheerful tulips in warm orange and yellow hues",
        category: "bouquets",
        featured: false,
        tags: &["tulips"],
        description: &[
            "Bright and cheerful, this bouquet of premium Dutch tulips in warm sunrise \
             tones of orange, coral, and golden yellow is the perfect pick-me-up.",
            "Sourced directly from our partner growers in the Netherlands, these tulips \
             arrive at peak freshness and will bloom beautifully over 5 to 7 days.",
        ],
    },
    Seed {
        slug: "pink-champagne-box",
        title: "Pink Champagne Box",
        price: 220,
        short_description: "Blush spray roses and peonies in a premium keepsake box",
        category: "flowers-in-a-box",
        featured: true,
        tags: &["roses", "peonies", "box"],
        description: &[
            "Pure luxury in a box. Blush spray roses and full-bloom peonies nestled \
             together in our premium signature keepsake box.",
            "The keepsake box can be repurposed long after the flowers have bloomed, \
             making it a truly lasting gift.",
        ],
    },
    Seed {
        slug: "seasonal-harvest-basket",
        title: "Seasonal Harvest Basket",
        price: 110,
        short_description: "A woven basket of the week's freshest seasonal stems",
        category: "baskets",
        featured: false,
        tags: &["seasonal", "basket"],
        description: &[
            "Our florists fill a hand-woven basket with whatever is most beautiful at \
             the market this week. No two baskets are ever the same.",
        ],
    },
];

impl Seed {
    fn build(&self) -> Option<Product> {
        let slug = match Slug::parse(self.slug) {
            Ok(slug) => slug,
            Err(e) => {
                tracing::error!(slug = self.slug, error = %e, "Invalid slug in built-in catalog");
                return None;
            }
        };

        Some(Product {
            id: ProductId::new(format!("fallback-{}", self.slug)),
            slug,
            title: self.title.to_string(),
            price: Price::from_units(self.price),
            short_description: Some(self.short_description.to_string()),
            description: self.description.iter().copied().map(Block::paragraph).collect(),
            category: Some(Category::new(self.category)),
            in_stock: true,
            featured: self.featured,
            tags: self.tags.iter().map(ToString::to_string).collect(),
            images: Vec::new(),
            videos: Vec::new(),
        })
    }
}

/// The built-in catalog, in display order.
#[must_use]
pub fn products() -> Vec<Product> {
    SEEDS.iter().filter_map(Seed::build).collect()
}
