use super::markdown::markdown_filter;
use crate::config::ModelsConfig;
use crate::prompt::TeraEngine;
use crate::solutions::{Catalog, CatalogQuery, Solution, SolutionKind, SolutionOutput};
use serde::Serialize;
use tera::Context;

const BASE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{% block title %}Solution Explorer{% endblock title %}</title>
<style>
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 0 auto; padding: 0 1rem 2rem; }
header { background: #008080; color: #fff; padding: 1rem; margin-bottom: 1rem; }
header a { color: inherit; text-decoration: none; }
header p { font-size: .75rem; }
.card { border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin: .75rem 0; }
.tag { display: inline-block; background: #eee; color: #333; border-radius: 999px; padding: .15rem .7rem; margin: .15rem; font-size: .85rem; text-decoration: none; }
.tag.selected { background: #008080; color: #fff; }
.answer { border: 1px solid #ddd; border-radius: 4px; padding: .5rem; overflow-x: auto; }
.answer.plain { white-space: pre-wrap; }
.answer table { border-collapse: collapse; }
.answer th, .answer td { border: 1px solid #ddd; padding: .25rem .5rem; }
.error { color: #b00020; }
textarea, input[type=search], input[type=url], select { width: 100%; box-sizing: border-box; margin: .25rem 0 .5rem; }
</style>
</head>
<body>
<header>
<h1><a href="/">AI Solution Explorer</a></h1>
<p>Browse and run demos of common AI usage patterns: chat, image generation and description, prompt chaining, routing, parallelization and orchestrator-workers.</p>
</header>
<main>
{% block content %}{% endblock content %}
</main>
</body>
</html>
"#;

const INDEX_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block content %}
<h2>Solution Explorer</h2>
<form method="get" action="/">
<input type="search" name="q" value="{{ search }}" placeholder="Search solutions...">
{% if selected_tags %}<input type="hidden" name="tags" value="{{ selected_tags }}">{% endif %}
<button type="submit">Search</button>
</form>
<nav>
{% for tag in tags %}<a class="tag{% if tag.selected %} selected{% endif %}" href="{{ tag.href | safe }}">{{ tag.name }}</a>
{% endfor %}{% if selected_tags %}<a class="tag" href="{{ clear_href | safe }}">All</a>{% endif %}
</nav>
{% for solution in solutions %}
<article class="card">
<h3><a href="/solutions/{{ solution.id }}">{{ solution.name }}</a></h3>
<p>{{ solution.description }}</p>
{% for tag in solution.tags %}<span class="tag">{{ tag }}</span>{% endfor %}
</article>
{% endfor %}
{% if not solutions %}<p>No solutions match.</p>{% endif %}
{% endblock content %}
"#;

const SOLUTION_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}{{ solution.name }} - Solution Explorer{% endblock title %}
{% block content %}
<article class="card">
<h2>{{ solution.name }}</h2>
<p>{{ solution.description }}</p>
{% for tag in solution.tags %}<span class="tag">{{ tag }}</span>{% endfor %}
</article>
<form method="post" action="/solutions/{{ solution.id }}">
{% if chat_models %}<label for="model">Select the model:</label>
<select id="model" name="model">
{% for model in chat_models %}<option value="{{ model }}"{% if model == selected_model %} selected{% endif %}>{{ model }}</option>
{% endfor %}</select>
{% endif %}<label for="input">{{ input_label }}</label>
{% if multiline %}<textarea id="input" name="input" rows="6" placeholder="{{ placeholder }}">{{ input }}</textarea>
{% else %}<input id="input" name="input" type="url" value="{{ input }}" placeholder="{{ placeholder }}">
{% endif %}<button type="submit">Send</button>
</form>
{% if error %}<p class="error">{{ error }}</p>{% endif %}
{% if output %}{% set r = output.result %}<section>
{% if output.kind == "chat" %}<h3>Chat Answer:</h3>
<div class="answer">{{ r.text | markdown | safe }}</div>
{% elif output.kind == "description" %}<h3>AI Output:</h3>
<div class="answer">{{ r.text | markdown | safe }}</div>
{% elif output.kind == "image" %}<h3>Output Image:</h3>
<img src="{{ r.url }}" alt="Generated image" width="512">
{% elif output.kind == "variation" %}<h3>Description:</h3>
<div class="answer">{{ r.prompt | markdown | safe }}</div>
<h3>Output Image:</h3>
<img src="{{ r.url }}" alt="Generated variation" width="512">
{% elif output.kind == "chain" %}{% for step in r.steps %}<h3>Prompt {{ step.step }}:</h3>
<div class="answer plain">{{ step.prompt }}</div>
<h3>Response {{ step.step }}:</h3>
<div class="answer">{{ step.response | markdown | safe }}</div>
{% endfor %}{% elif output.kind == "routes" %}{% for item in r %}<h3>Prompt {{ loop.index }}:</h3>
<div class="answer plain">{{ item.prompt }}</div>
<h3>Selected Route {{ loop.index }}:</h3>
<div class="answer plain">{{ item.output.selection.route }}</div>
<div class="answer plain">{{ item.output.selection.reason }}</div>
<h3>Response {{ loop.index }}:</h3>
<div class="answer">{{ item.output.response | markdown | safe }}</div>
{% endfor %}{% elif output.kind == "parallel" %}{% for proposal in r.proposals %}<h3>Intermediate Response: {{ loop.index }}</h3>
<p>{{ proposal.model }}</p>
<div class="answer">{{ proposal.response | markdown | safe }}</div>
{% endfor %}<h3>Final Answer:</h3>
<div class="answer">{{ r.aggregated | markdown | safe }}</div>
{% elif output.kind == "orchestrator" %}<h3>Analysis:</h3>
<div class="answer">{{ r.analysis | markdown | safe }}</div>
{% for item in r.outputs %}<h3>Approach {{ loop.index }}: {{ item.task.type }}</h3>
<p>{{ item.task.description }}</p>
<div class="answer">{{ item.response | markdown | safe }}</div>
{% endfor %}{% endif %}</section>
{% endif %}{% endblock content %}
"#;

const NOT_FOUND_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block content %}
<h2>Solution not found</h2>
<p><a href="/">Back to the catalog</a></p>
{% endblock content %}
"#;

const BASE_NAME: &str = "base.html";
const INDEX_NAME: &str = "index.html";
const SOLUTION_NAME: &str = "solution.html";
const NOT_FOUND_NAME: &str = "not_found.html";

#[derive(Serialize)]
struct TagLink<'a> {
    name: &'a str,
    selected: bool,
    href: String,
}

/// What the solution page shows below the form.
#[derive(Debug, Default)]
pub struct FormState<'a> {
    pub input: &'a str,
    pub model: Option<&'a str>,
    pub output: Option<&'a SolutionOutput>,
    pub error: Option<&'a str>,
}

fn catalog_href(search: &str, tags: &[String]) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if !search.is_empty() {
        query.append_pair("q", search);
    }
    if !tags.is_empty() {
        query.append_pair("tags", &tags.join(","));
    }
    let query = query.finish();
    if query.is_empty() {
        "/".into()
    } else {
        format!("/?{query}")
    }
}

/// HTML pages, rendered with escaping on.
pub struct Views {
    engine: TeraEngine,
}

impl Views {
    pub fn new() -> anyhow::Result<Self> {
        let mut engine = TeraEngine::html();
        engine.register_filter("markdown", markdown_filter);
        engine.add_templates(&[
            (BASE_NAME, BASE_TEMPLATE),
            (INDEX_NAME, INDEX_TEMPLATE),
            (SOLUTION_NAME, SOLUTION_TEMPLATE),
            (NOT_FOUND_NAME, NOT_FOUND_TEMPLATE),
        ])?;
        Ok(Self { engine })
    }

    pub fn index(&self, catalog: &Catalog, query: &CatalogQuery) -> anyhow::Result<String> {
        let search = query.search.trim();
        let tags: Vec<TagLink<'_>> = catalog
            .all_tags()
            .into_iter()
            .map(|name| TagLink {
                name,
                selected: query.is_selected(name),
                href: catalog_href(search, &query.toggled(name)),
            })
            .collect();

        let mut ctx = Context::new();
        ctx.insert("search", search);
        ctx.insert("selected_tags", &query.tags.join(","));
        ctx.insert("tags", &tags);
        ctx.insert("clear_href", &catalog_href(search, &[]));
        ctx.insert("solutions", &catalog.filter(query));
        self.engine.render(INDEX_NAME, &ctx)
    }

    pub fn solution(
        &self,
        solution: &Solution,
        models: &ModelsConfig,
        form: &FormState<'_>,
    ) -> anyhow::Result<String> {
        let chat_models: &[String] = if solution.kind == SolutionKind::BasicChat {
            &models.chat_models
        } else {
            &[]
        };

        let mut ctx = Context::new();
        ctx.insert("solution", solution);
        ctx.insert("chat_models", chat_models);
        ctx.insert(
            "selected_model",
            form.model.unwrap_or(models.default_chat_model.as_str()),
        );
        ctx.insert("input_label", solution.kind.input_label());
        ctx.insert("placeholder", solution.kind.sample_input());
        ctx.insert("multiline", &solution.kind.multiline());
        ctx.insert("input", form.input);
        ctx.insert("output", &form.output);
        ctx.insert("error", &form.error);
        self.engine.render(SOLUTION_NAME, &ctx)
    }

    pub fn not_found(&self) -> anyhow::Result<String> {
        self.engine.render(NOT_FOUND_NAME, &Context::new())
    }
}
