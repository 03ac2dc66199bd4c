//! Interface strings for both locales.
//!
//! Keys are a closed enum, so a typo is a compile error rather than a blank
//! label at runtime. The English table is an exhaustive `match` and therefore
//! always complete; the Arabic table may leave a key out (brand names read
//! the same in both), in which case [`t`] falls back to English.

use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    NavHome,
    NavServices,
    NavGallery,
    NavBlog,
    NavContact,
    SkipToContent,
    Language,
    HeroCta,
    ServicesHeading,
    ServicesIntro,
    LearnMore,
    GalleryHeading,
    GalleryIntro,
    Before,
    After,
    Previous,
    Next,
    ReviewsHeading,
    FaqHeading,
    BlogHeading,
    BlogIntro,
    ReadMore,
    BackToBlog,
    ContactHeading,
    ContactIntro,
    FieldName,
    FieldPhone,
    FieldService,
    FieldMessage,
    ChooseService,
    Submit,
    NameRequired,
    PhoneInvalid,
    ServiceRequired,
    CallUs,
    WhatsApp,
    RightsReserved,
}

impl TextKey {
    pub const ALL: [TextKey; 37] = [
        Self::NavHome,
        Self::NavServices,
        Self::NavGallery,
        Self::NavBlog,
        Self::NavContact,
        Self::SkipToContent,
        Self::Language,
        Self::HeroCta,
        Self::ServicesHeading,
        Self::ServicesIntro,
        Self::LearnMore,
        Self::GalleryHeading,
        Self::GalleryIntro,
        Self::Before,
        Self::After,
        Self::Previous,
        Self::Next,
        Self::ReviewsHeading,
        Self::FaqHeading,
        Self::BlogHeading,
        Self::BlogIntro,
        Self::ReadMore,
        Self::BackToBlog,
        Self::ContactHeading,
        Self::ContactIntro,
        Self::FieldName,
        Self::FieldPhone,
        Self::FieldService,
        Self::FieldMessage,
        Self::ChooseService,
        Self::Submit,
        Self::NameRequired,
        Self::PhoneInvalid,
        Self::ServiceRequired,
        Self::CallUs,
        Self::WhatsApp,
        Self::RightsReserved,
    ];
}

fn english(key: TextKey) -> &'static str {
    use TextKey::*;
    match key {
        NavHome => "Home",
        NavServices => "Services",
        NavGallery => "Smile Gallery",
        NavBlog => "Blog",
        NavContact => "Contact",
        SkipToContent => "Skip to content",
        Language => "Language",
        HeroCta => "Book an appointment",
        ServicesHeading => "Our Services",
        ServicesIntro => "Complete dental care for the whole family, under one roof.",
        LearnMore => "Learn more",
        GalleryHeading => "Before & After",
        GalleryIntro => "Real results from our patients.",
        Before => "Before",
        After => "After",
        Previous => "Previous",
        Next => "Next",
        ReviewsHeading => "What Our Patients Say",
        FaqHeading => "Frequently Asked Questions",
        BlogHeading => "Dental Tips & News",
        BlogIntro => "Advice from our dentists for a healthier smile.",
        ReadMore => "Read more",
        BackToBlog => "Back to blog",
        ContactHeading => "Book Your Visit",
        ContactIntro => "Send us your details and we will confirm your appointment on WhatsApp.",
        FieldName => "Name",
        FieldPhone => "Phone",
        FieldService => "Service",
        FieldMessage => "Message",
        ChooseService => "Choose a service",
        Submit => "Send via WhatsApp",
        NameRequired => "Please enter your name",
        PhoneInvalid => "Please enter a valid phone number",
        ServiceRequired => "Please choose a service",
        CallUs => "Call us",
        WhatsApp => "WhatsApp",
        RightsReserved => "All rights reserved.",
    }
}

fn arabic(key: TextKey) -> Option<&'static str> {
    use TextKey::*;
    let text = match key {
        NavHome => "الرئيسية",
        NavServices => "خدماتنا",
        NavGallery => "معرض الابتسامات",
        NavBlog => "المدونة",
        NavContact => "تواصل معنا",
        SkipToContent => "انتقل إلى المحتوى",
        Language => "اللغة",
        HeroCta => "احجز موعدك",
        ServicesHeading => "خدماتنا",
        ServicesIntro => "رعاية متكاملة للأسنان لكل أفراد العائلة في مكان واحد.",
        LearnMore => "اعرف المزيد",
        GalleryHeading => "قبل وبعد",
        GalleryIntro => "نتائج حقيقية لمرضانا.",
        Before => "قبل",
        After => "بعد",
        Previous => "السابق",
        Next => "التالي",
        ReviewsHeading => "آراء مرضانا",
        FaqHeading => "الأسئلة الشائعة",
        BlogHeading => "نصائح وأخبار الأسنان",
        BlogIntro => "نصائح من أطبائنا لابتسامة أكثر صحة.",
        ReadMore => "اقرأ المزيد",
        BackToBlog => "العودة إلى المدونة",
        ContactHeading => "احجز زيارتك",
        ContactIntro => "أرسل لنا بياناتك وسنؤكد موعدك عبر واتساب.",
        FieldName => "الاسم",
        FieldPhone => "رقم الهاتف",
        FieldService => "الخدمة",
        FieldMessage => "الرسالة",
        ChooseService => "اختر الخدمة",
        Submit => "أرسل عبر واتساب",
        NameRequired => "من فضلك أدخل اسمك",
        PhoneInvalid => "من فضلك أدخل رقم هاتف صحيح",
        ServiceRequired => "من فضلك اختر الخدمة",
        CallUs => "اتصل بنا",
        RightsReserved => "جميع الحقوق محفوظة.",
        WhatsApp => return None,
    };
    Some(text)
}

/// The locale's own string for `key`, without fallback.
pub fn lookup(locale: Locale, key: TextKey) -> Option<&'static str> {
    match locale {
        Locale::En => Some(english(key)),
        Locale::Ar => arabic(key),
    }
}

/// The string for `key` in `locale`, falling back to English.
pub fn t(locale: Locale, key: TextKey) -> &'static str {
    lookup(locale, key).unwrap_or_else(|| english(key))
}
