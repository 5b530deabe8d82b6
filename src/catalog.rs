//! Product catalog and its detail dialog

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::port::PresentationPort;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Product {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub image: &'static str,
    pub description: &'static str,
    pub benefits: &'static [&'static str],
    pub usage: &'static str,
}

pub const PRODUCTS: &[Product] = &[
    Product {
        id: "rumen-yeast",
        title: "Rumen Yeast",
        subtitle: "Живые дрожжи (Saccharomyces cerevisiae)",
        image: "rumen.png",
        description: "Кормовая добавка на основе живых дрожжей Saccharomyces cerevisiae для поддержки рубца и повышения эффективности кормления.",
        benefits: &[
            "Улучшает пищеварение",
            "Поддерживает микрофлору рубца",
            "Увеличивает надой",
        ],
        usage: "Смешивать с кормом по схеме хозяйства. Назначение: молочный и мясной КРС.",
    },
    Product {
        id: "premix",
        title: "Витаминно-минеральный премикс",
        subtitle: "Для всех ферм",
        image: "premix.png",
        description: "Премикс для ежедневного обогащения рациона витаминами и минералами. Используется на всех фермах.",
        benefits: &["Vitamin A, D3, E", "Calcium и Phosphorus", "Zinc и Selenium"],
        usage: "Добавлять в комбикорм по норме рациона. Назначение: регулярная витаминно-минеральная поддержка.",
    },
    Product {
        id: "dairy-concentrate",
        title: "MAG Agro Dairy Concentrate",
        subtitle: "Концентрат для молочного КРС",
        image: "dairy.png",
        description: "Высокоэффективный концентрат для молочного КРС, разработанный для увеличения надоев, улучшения качества молока и поддержания здоровья животных.",
        benefits: &[
            "Увеличение надоев на 10–20%",
            "Улучшение жирности молока",
            "Укрепление иммунитета",
            "Улучшение пищеварения",
            "Сырой протеин: 30–38%, витамины A, D3, E, кальций, фосфор, живые дрожжи",
        ],
        usage: "Рекомендуемая дозировка: 1–3 кг на голову в сутки или 10–20% от комбикорма. Назначение: молочные фермы и сельскохозяйственные предприятия.",
    },
    Product {
        id: "protein-concentrate",
        title: "MAG Agro Protein Concentrate 35%",
        subtitle: "Белковый концентрат (Protein concentrate)",
        image: "protein.png",
        description: "Высокобелковый концентрат для увеличения привеса, улучшения кормления и повышения эффективности производства.",
        benefits: &[
            "Ускорение роста КРС",
            "Увеличение привеса на 10–15%",
            "Улучшение конверсии корма",
            "Сырой протеин: 35%, соевый и подсолнечный шрот, витамины, минералы, аминокислоты",
        ],
        usage: "Рекомендуемая дозировка: 5–20% от комбикорма. Назначение: мясной и молочный КРС, комбикормовые заводы.",
    },
    Product {
        id: "calf-starter",
        title: "MAG Agro Calf Starter Concentrate",
        subtitle: "Специализированный концентрат для телят",
        image: "calf.png",
        description: "Концентрат для телят, обеспечивающий быстрый рост, развитие рубца и укрепление здоровья.",
        benefits: &[
            "Ускорение роста телят",
            "Развитие рубца",
            "Снижение заболеваемости",
            "Сырой протеин: 18–24%, витамины A, D3, E, минеральный комплекс, пробиотики",
        ],
        usage: "Рекомендуемая дозировка: 0.5–2 кг на голову в сутки. Назначение: телята от 2 недель до 6 месяцев.",
    },
];

const OPEN_ICON: &str = r##"<svg viewBox="0 0 24 24" fill="none" aria-hidden="true"><path d="M7 17L17 7" stroke="#111" stroke-width="2.2" stroke-linecap="round"/><path d="M9 7h8v8" stroke="#111" stroke-width="2.2" stroke-linecap="round"/></svg>"##;

/// Markup of one catalog card. The open button carries `data-open`.
pub fn card_markup(p: &Product) -> String {
    format!(
        r#"<article class="catcard"><div class="catcard__imgWrap"><img class="catcard__img" src="{img}" alt="{alt}"></div><div class="catcard__body"><h3 class="catcard__name">{title}</h3><p class="catcard__sub">{sub}</p></div><button class="catcard__go" type="button" aria-label="Подробнее" data-open="{id}">{icon}</button></article>"#,
        img = attr(p.image),
        alt = attr(p.title),
        title = text(p.title),
        sub = text(p.subtitle),
        id = attr(p.id),
        icon = OPEN_ICON,
    )
}

pub fn grid_markup(products: &[Product]) -> String {
    products.iter().map(card_markup).collect()
}

pub fn benefits_markup(p: &Product) -> String {
    let mut out = String::new();
    for b in p.benefits {
        let _ = write!(out, "<li>{}</li>", text(b));
    }
    out
}

/// Open/close state of the detail dialog.
#[derive(Clone, Debug)]
pub struct CatalogController {
    products: &'static [Product],
    open: Option<&'static Product>,
}

impl CatalogController {
    pub fn new(products: &'static [Product]) -> Self {
        Self {
            products,
            open: None,
        }
    }

    pub fn open_product(&self) -> Option<&'static Product> {
        self.open
    }

    /// Open the detail for `id`. Unknown ids are ignored.
    pub fn open(&mut self, id: &str, port: &mut impl PresentationPort) -> bool {
        let products = self.products;
        let Some(product) = products.iter().find(|p| p.id == id) else {
            log::debug!("no product with id {:?}", id);
            return false;
        };
        self.open = Some(product);
        port.open_detail(product);
        true
    }

    pub fn close(&mut self, port: &mut impl PresentationPort) -> bool {
        if self.open.take().is_none() {
            return false;
        }
        port.close_detail();
        true
    }

    /// Escape closes an open dialog.
    pub fn handle_key(&mut self, key: &str, port: &mut impl PresentationPort) -> bool {
        key == "Escape" && self.close(port)
    }
}

impl Default for CatalogController {
    fn default() -> Self {
        Self::new(PRODUCTS)
    }
}
