//! Prompts for the query and summary stages.
//!
//! The summary prompt is built deterministically from the session state;
//! no truncation or length capping is applied, so a large place or
//! review set yields a correspondingly large prompt.

use crate::types::session::SeekState;

/// Instruction block for synthesizing a structured search query from a
/// free-text outing request.
pub const SYNTHESIZE_QUERY_INSTRUCTION: &str = r#"
あなたはユーザに変わってユーザのお出かけの要望をヒアリングし、地図のテキスト検索APIに投げる適切なクエリを作る必要があります。

textQuery作成は以下のステップで作成する！！これは絶対に守ること！！！
1. humanの入力を分析し、キーワードを3つ抽出する。短い単語で区切る。
2. そのキーワードをスペースを挟んで並べる
3. その文章をtextQueryとする。

例：
user_request=神田でラーメン食べたい
textQuery=神田 ラーメン

languageCode='ja'
pageSize=5

出力前に、以下を満たしているか、必ず確認すること。
・textQueryは2個か3個の名詞を半角スペース区切りで繋いだ文章とする。
"#;

/// Placeholder for values the upstream services did not provide.
const UNKNOWN: &str = "不明";

/// Render the recommendation prompt for the summary stage.
///
/// Embeds the user's request, the number of enriched places, and per
/// place every review and news article collected upstream. Both
/// summarizer modes consume this same text.
pub fn format_summary_prompt(state: &SeekState) -> String {
    let mut prompt = format!(
        r#"さて、あなたはお出かけ先を探そうとする友人を手伝おうとしています。
あなたの友人は、「{request}」という要望を持っています。

あなたの仕事は、その友人の要望に応えることです。
お店探しというステップは難しく、最終的にユーザが納得しないといけません。
そのためにはユーザの要望にどれだけ合致しているかももちろんですが、レビューが良いことや、例えばスポットがニュースに取り上げられていることも重要な手掛かりとなります。
どうすればユーザが自分の意思決定に満足度を持てるかを常に注意しながら、スポットをオススメする文言を考えてください。

そこで、あなたは以下のステップを踏んで情報探しをすることにしました。
・まず、お題をもとに地図でスポットを検索します。
・上位のスポットについて、口コミの点数や件数、上位レビューを確認します。
・また、スポットの名前でニュース記事についても検索します。
・これらの情報をもとに、候補のスポットをオススメ順に並び替えて、5点満点で評価しながらおすすめの文言を伝えます。

今回、検索では{count}件のスポットが見つかっています。
それぞれの情報を以下に送ります。
"#,
        request = state.user_request,
        count = state.enriched_places.len(),
    );

    for (i, enriched) in state.enriched_places.iter().enumerate() {
        let place = &enriched.place;
        let rating = place
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let ratings_total = place
            .user_ratings_total
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        prompt.push_str(&format!(
            "\nスポット候補{}件目：{}\nレビューの点数（5点満点）：{}\nレビューの件数：{}\n",
            i + 1,
            place.name,
            rating,
            ratings_total,
        ));

        for (j, review) in place.reviews.iter().flatten().enumerate() {
            prompt.push_str(&format!(
                "レビュー{}件目：{}さん、評価は{}点、レビュー内容は次のとおり。{}\n",
                j + 1,
                review.author_name,
                review.rating,
                review.text,
            ));
        }

        for (j, news) in enriched.news_articles.iter().enumerate() {
            prompt.push_str(&format!(
                "記事{}件目：「{}」というサイトが「{}」というタイトルの記事。概要は「{}」。\n",
                j + 1,
                news.site_name.as_deref().unwrap_or(UNKNOWN),
                news.title,
                news.description.as_deref().unwrap_or(UNKNOWN),
            ));
        }
    }

    prompt.push_str(&format!(
        r#"
最後に、ユーザからの要望を改めて伝えます。
「{request}」
これまでの情報をもとに、どのスポットがユーザの希望を満たすかどうかを踏まえた上で、総合的な評価コメントを書いてください。
得られた情報だけではユーザの希望を満たすかどうかわからないときは、素直にそう書いてください。
自信満々で回答できるときは、自信満々に回答してください。
"#,
        request = state.user_request,
    ));

    prompt
}
