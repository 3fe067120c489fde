use clap::ValueEnum;
use heatmap_catalog::ChartKind;
use heatmap_matrix::TopicAxis;

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum ChartKindFlag {
    Bar,
    Line,
    Scatter,
    Pie,
}

impl ChartKindFlag {
    pub(crate) const fn as_domain(self) -> ChartKind {
        match self {
            ChartKindFlag::Bar => ChartKind::Bar,
            ChartKindFlag::Line => ChartKind::Line,
            ChartKindFlag::Scatter => ChartKind::Scatter,
            ChartKindFlag::Pie => ChartKind::Pie,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum TopicAxisFlag {
    Domain,
    Dimension,
}

impl TopicAxisFlag {
    pub(crate) const fn as_domain(self) -> TopicAxis {
        match self {
            TopicAxisFlag::Domain => TopicAxis::Domain,
            TopicAxisFlag::Dimension => TopicAxis::Dimension,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum SchemaKind {
    Matrix,
    Cell,
    Chart,
    Checklist,
    Label,
    Error,
}
