use leptos::prelude::*;
use leptos_meta::Title;
use leptos_use::use_media_query;

use crate::config::{Project, SiteConfig};

use super::anchor::AnchorLink;
use super::contact::ContactSection;
use super::demo_modal::DemoModalHandle;
use super::reveal::Reveal;
use super::typed::TypedText;

#[component]
pub fn HomePage() -> impl IntoView {
    let SiteConfig {
        tagline,
        typing,
        mounts,
        stats,
        projects,
        ..
    } = expect_context::<SiteConfig>();

    view! {
        <Title text="Home" />
        <section
            id="home"
            class="hero min-h-screen w-full max-w-6xl px-4 flex flex-col justify-center"
        >
            <p class="text-lg text-muted mb-2">"Hi, I'm"</p>
            <h1 class="text-4xl lg:text-6xl font-bold mb-6 min-h-[1.2em]">
                <TypedText settings=typing surface_id=mounts.typed_text_id />
            </h1>
            <p class="text-lg max-w-2xl mb-8 leading-relaxed">{tagline}</p>
            <div class="flex flex-wrap gap-4">
                <AnchorLink
                    href="#projects"
                    class="px-6 py-3 bg-cyan/20 hover:bg-cyan/30 text-cyan rounded-md border border-cyan/30"
                >
                    "View my work"
                </AnchorLink>
                <AnchorLink
                    href="#contact"
                    class="px-6 py-3 rounded-md border border-muted/30 hover:border-cyan"
                >
                    "Get in touch"
                </AnchorLink>
            </div>
        </section>
        <section id="about" class="w-full max-w-6xl px-4 py-16">
            <h2 class="text-3xl font-bold mb-8 text-center">"About Me"</h2>
            <div class="grid gap-6 sm:grid-cols-3">
                {stats
                    .into_iter()
                    .map(|stat| {
                        view! {
                            <Reveal class="stat-card p-6 rounded-lg bg-brightBlack/30 text-center">
                                <span class="block text-3xl font-bold text-cyan">{stat.value}</span>
                                <span class="text-muted">{stat.label}</span>
                            </Reveal>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
        <section id="projects" class="w-full max-w-6xl px-4 py-16">
            <h2 class="text-3xl font-bold mb-8 text-center">"Projects"</h2>
            <div class="grid gap-8 md:grid-cols-2 lg:grid-cols-3">
                {projects
                    .into_iter()
                    .map(|project| view! { <ProjectCard project /> })
                    .collect_view()}
            </div>
        </section>
        <ContactSection />
    }
}

#[component]
fn ProjectCard(project: Project) -> impl IntoView {
    let modal = expect_context::<DemoModalHandle>();
    // lift on hover only where the device can actually hover
    let can_hover = use_media_query("(hover: hover)");
    let (lifted, set_lifted) = signal(false);
    let Project {
        title,
        description,
        tags,
        repo,
        demo,
    } = project;

    view! {
        <Reveal class="project-card">
            <article
                class="h-full flex flex-col p-6 rounded-lg border border-muted/30 bg-brightBlack/20 transition-transform duration-300"
                style=move || {
                    if lifted.get() { "transform: translateY(-10px)" } else { "transform: translateY(0)" }
                }
                on:mouseenter=move |_| {
                    if can_hover.get_untracked() {
                        set_lifted.set(true);
                    }
                }
                on:mouseleave=move |_| set_lifted.set(false)
            >
                <h3 class="text-xl font-bold mb-2">{title}</h3>
                <p class="flex-grow mb-4 leading-relaxed">{description}</p>
                <ul class="flex flex-wrap gap-2 mb-4 text-sm">
                    {tags
                        .into_iter()
                        .map(|tag| view! { <li class="px-2 py-1 rounded bg-cyan/10 text-cyan">{tag}</li> })
                        .collect_view()}
                </ul>
                <div class="flex gap-4">
                    {demo
                        .map(|demo| {
                            let source = demo.source.clone();
                            view! {
                                <button
                                    type="button"
                                    class="demo-button text-cyan hover:underline"
                                    data-demo=source
                                    on:click=move |_| modal.open(demo.clone())
                                >
                                    <i class="fas fa-play mr-1"></i>
                                    "Watch demo"
                                </button>
                            }
                        })}
                    {repo
                        .map(|repo| {
                            view! {
                                <a
                                    href=repo
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    class="hover:text-cyan"
                                >
                                    <i class="fab fa-github mr-1"></i>
                                    "Source"
                                </a>
                            }
                        })}
                </div>
            </article>
        </Reveal>
    }
}
