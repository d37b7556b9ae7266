//! The SalesForecast product FAQ.

use super::{KnowledgeBase, KnowledgeEntry};

/// First assistant message of every conversation.
pub const GREETING: &str = "Hi! I'm your SalesForecast assistant. How can I help you today?";

/// Prompts offered before the user has said anything.
pub const QUICK_ACTIONS: [&str; 4] = [
    "What is SalesForecast?",
    "How does it work?",
    "Pricing plans",
    "Free trial",
];

const ENTRIES: &[(&str, &str, &[&str])] = &[
    (
        "What is SalesForecast?",
        "SalesForecast is an AI-powered sales prediction platform that helps businesses optimize inventory management through localized forecasting. We use machine learning to analyze historical data and predict future sales trends with 95% accuracy.",
        &["what is", "about", "salesforecast", "platform", "what does"],
    ),
    (
        "How does the AI prediction work?",
        "Our AI engine analyzes your historical sales data, local market trends, seasonal patterns, and demographic factors. It uses advanced machine learning algorithms to identify patterns and generate accurate forecasts for your specific location and business type.",
        &["how", "ai", "prediction", "work", "algorithm", "machine learning"],
    ),
    (
        "What are the pricing plans?",
        "We offer three plans:\n\n**Starter ($29/month)**: Up to 1,000 products, basic predictions, 1 location\n\n**Professional ($79/month)**: Up to 10,000 products, advanced AI, 5 locations, custom reports\n\n**Enterprise ($199/month)**: Unlimited products, premium AI, unlimited locations, API access, dedicated manager\n\nAll plans include a 14-day free trial!",
        &["price", "pricing", "cost", "plans", "how much", "subscription", "pay"],
    ),
    (
        "How accurate are the predictions?",
        "Our AI-powered predictions achieve 95% accuracy on average. Accuracy improves over time as the system learns from your business patterns. We continuously refine our models based on actual vs. predicted performance.",
        &["accurate", "accuracy", "reliable", "how good", "precision"],
    ),
    (
        "What features are included?",
        "Key features include:\n• Location-based sales forecasting\n• AI-powered demand predictions\n• Smart inventory optimization\n• Real-time analytics dashboard\n• Automated low-stock alerts\n• Cost optimization insights\n• Custom reports and exports\n• Multi-location support",
        &["features", "what can", "capabilities", "functionality", "includes"],
    ),
    (
        "How do I get started?",
        "Getting started is easy!\n1. Click 'Get Started Free' or 'Sign Up'\n2. Create your account\n3. Connect your sales data (CSV upload or API integration)\n4. Add your business location\n5. Get your first predictions within 24 hours!\n\nOur team will guide you through the setup process.",
        &["start", "begin", "setup", "sign up", "register", "onboard"],
    ),
    (
        "Do you offer a free trial?",
        "Yes! We offer a 14-day free trial on all plans. No credit card required. You'll get full access to all features during the trial period so you can experience the power of AI-driven sales forecasting.",
        &["free trial", "trial", "free", "demo", "test"],
    ),
    (
        "What kind of businesses can use SalesForecast?",
        "SalesForecast is perfect for:\n• Retail stores\n• E-commerce businesses\n• Restaurants and cafes\n• Wholesale distributors\n• Manufacturing companies\n• Multi-location chains\n\nAny business that manages inventory and wants to optimize stock levels can benefit!",
        &["business", "who can", "suitable", "industry", "type", "use"],
    ),
    (
        "How does location-based forecasting work?",
        "Our system analyzes local factors like:\n• Regional market trends\n• Local demographics\n• Seasonal patterns in your area\n• Local events and holidays\n• Weather patterns\n• Competition density\n\nThis ensures predictions are tailored to your specific location, not generic national trends.",
        &["location", "localized", "local", "regional", "area"],
    ),
    (
        "Can I integrate with my existing systems?",
        "Yes! We support:\n• CSV/Excel file imports\n• API integrations\n• Popular POS systems\n• E-commerce platforms (Shopify, WooCommerce, etc.)\n• Inventory management systems\n• ERP systems\n\nOur Enterprise plan includes custom API access and dedicated integration support.",
        &["integrate", "integration", "api", "connect", "import", "export", "sync"],
    ),
    (
        "What support do you provide?",
        "Support varies by plan:\n• **Starter**: Email support (24-48 hour response)\n• **Professional**: Priority email support + live chat\n• **Enterprise**: 24/7 support + dedicated account manager + phone support\n\nAll plans include comprehensive documentation and video tutorials.",
        &["support", "help", "customer service", "assistance", "contact"],
    ),
    (
        "How secure is my data?",
        "We take security seriously:\n• 256-bit SSL encryption\n• SOC 2 Type II certified\n• GDPR compliant\n• Regular security audits\n• Encrypted data storage\n• Role-based access controls\n\nYour data is never shared with third parties and you maintain full ownership.",
        &["secure", "security", "safe", "privacy", "data protection", "encryption"],
    ),
];

pub(super) fn knowledge_base() -> KnowledgeBase {
    let entries = ENTRIES
        .iter()
        .map(|(question, answer, keywords)| KnowledgeEntry {
            question: (*question).to_string(),
            answer: (*answer).to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        })
        .collect();
    KnowledgeBase { entries }
}
